use ansi_term::Colour;
use chrono::NaiveDate;

use crate::{
    locale::{currency, pick, Language},
    utils::time::format_record_date,
};

/// Listings show only this many characters of an id, any unambiguous prefix is accepted back.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn format_amount(amount: f64, language: Language) -> String {
    format!("{amount:.2} {}", currency(language))
}

pub fn format_date(date: NaiveDate) -> String {
    format_record_date(date)
}

/// Green when others owe money, red when money is owed.
pub fn format_balance(amount: f64, language: Language) -> String {
    let text = format_amount(amount, language);
    if amount > 0. {
        Colour::Green.paint(text).to_string()
    } else if amount < 0. {
        Colour::Red.paint(text).to_string()
    } else {
        text
    }
}

pub fn completed_mark(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn print_not_found(reference: &str, language: Language) {
    println!(
        "{} {reference:?}",
        pick(language, "لا يوجد سجل بالمعرف", "No record with id")
    );
}

pub fn print_empty(language: Language) {
    println!("{}", pick(language, "لا توجد سجلات", "Nothing recorded yet"));
}
