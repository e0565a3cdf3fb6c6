//! Built-in catalogue of adhkar, grouped by the occasion they are said on.

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::locale::{pick, Language, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DhikrCategory {
    Morning,
    Evening,
    Sleep,
    Food,
    Travel,
    General,
}

impl Localized for DhikrCategory {
    fn label(&self, language: Language) -> &'static str {
        match self {
            DhikrCategory::Morning => pick(language, "الصباح", "Morning"),
            DhikrCategory::Evening => pick(language, "المساء", "Evening"),
            DhikrCategory::Sleep => pick(language, "النوم", "Sleep"),
            DhikrCategory::Food => pick(language, "الطعام", "Food"),
            DhikrCategory::Travel => pick(language, "السفر", "Travel"),
            DhikrCategory::General => pick(language, "عامة", "General"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dhikr {
    pub arabic: &'static str,
    pub translation: &'static str,
    pub category: DhikrCategory,
    /// How many times it is repeated.
    pub count: u32,
}

const fn dhikr(
    category: DhikrCategory,
    count: u32,
    arabic: &'static str,
    translation: &'static str,
) -> Dhikr {
    Dhikr {
        arabic,
        translation,
        category,
        count,
    }
}

pub const ADHKAR: [Dhikr; 14] = [
    dhikr(
        DhikrCategory::Morning,
        1,
        "أَصْبَحْنَا وَأَصْبَحَ الْمُلْكُ لِلَّهِ، وَالْحَمْدُ لِلَّهِ، لَا إِلَهَ إِلَّا اللَّهُ وَحْدَهُ لَا شَرِيكَ لَهُ، لَهُ الْمُلْكُ وَلَهُ الْحَمْدُ وَهُوَ عَلَى كُلِّ شَيْءٍ قَدِيرٌ",
        "We have entered a new day and with it all the dominion which belongs to Allah. Praise be to Allah. None has the right to be worshipped but Allah alone, Who has no partner.",
    ),
    dhikr(
        DhikrCategory::Morning,
        3,
        "اللَّهُمَّ إِنِّي أَسْأَلُكَ الْعَفْوَ وَالْعَافِيَةَ فِي الدُّنْيَا وَالْآخِرَةِ",
        "O Allah, I ask You for pardon and well-being in this life and the next.",
    ),
    dhikr(
        DhikrCategory::Evening,
        1,
        "أَمْسَيْنَا وَأَمْسَى الْمُلْكُ لِلَّهِ، وَالْحَمْدُ لِلَّهِ، لَا إِلَهَ إِلَّا اللَّهُ وَحْدَهُ لَا شَرِيكَ لَهُ",
        "We have entered the evening and with it all the dominion which belongs to Allah. Praise be to Allah. None has the right to be worshipped but Allah alone.",
    ),
    dhikr(
        DhikrCategory::Sleep,
        1,
        "بِاسْمِكَ اللَّهُمَّ أَمُوتُ وَأَحْيَا",
        "In Your name, O Allah, I die and I live.",
    ),
    dhikr(
        DhikrCategory::Sleep,
        3,
        "اللَّهُمَّ قِنِي عَذَابَكَ يَوْمَ تَبْعَثُ عِبَادَكَ",
        "O Allah, protect me from Your punishment on the Day You resurrect Your servants.",
    ),
    dhikr(DhikrCategory::Food, 1, "بِسْمِ اللَّهِ", "In the name of Allah."),
    dhikr(
        DhikrCategory::Food,
        1,
        "الْحَمْدُ لِلَّهِ الَّذِي أَطْعَمَنِي هَذَا وَرَزَقَنِيهِ مِنْ غَيْرِ حَوْلٍ مِنِّي وَلَا قُوَّةٍ",
        "Praise be to Allah Who has fed me this and provided me with it without any power or might from myself.",
    ),
    dhikr(
        DhikrCategory::Travel,
        1,
        "سُبْحَانَ الَّذِي سَخَّرَ لَنَا هَذَا وَمَا كُنَّا لَهُ مُقْرِنِينَ وَإِنَّا إِلَى رَبِّنَا لَمُنْقَلِبُونَ",
        "Glory to Him Who has subjected this to us, and we could never have it (by our efforts). And verily, to Our Lord we indeed are to return.",
    ),
    dhikr(
        DhikrCategory::General,
        100,
        "سُبْحَانَ اللَّهِ وَبِحَمْدِهِ",
        "Glory be to Allah and His is the praise.",
    ),
    dhikr(
        DhikrCategory::General,
        100,
        "لَا إِلَهَ إِلَّا اللَّهُ وَحْدَهُ لَا شَرِيكَ لَهُ، لَهُ الْمُلْكُ وَلَهُ الْحَمْدُ، وَهُوَ عَلَى كُلِّ شَيْءٍ قَدِيرٌ",
        "None has the right to be worshipped but Allah alone, Who has no partner. His is the dominion and His is the praise, and He is Able to do all things.",
    ),
    dhikr(
        DhikrCategory::General,
        100,
        "أَسْتَغْفِرُ اللَّهَ وَأَتُوبُ إِلَيْهِ",
        "I seek Allah's forgiveness and turn to Him in repentance.",
    ),
    dhikr(
        DhikrCategory::General,
        10,
        "اللَّهُمَّ صَلِّ وَسَلِّمْ عَلَى نَبِيِّنَا مُحَمَّدٍ",
        "O Allah, send blessings and peace upon our Prophet Muhammad.",
    ),
    dhikr(
        DhikrCategory::General,
        10,
        "لَا حَوْلَ وَلَا قُوَّةَ إِلَّا بِاللَّهِ",
        "There is no might nor power except with Allah.",
    ),
    dhikr(
        DhikrCategory::General,
        7,
        "حَسْبُنَا اللَّهُ وَنِعْمَ الْوَكِيلُ",
        "Allah is Sufficient for us, and He is the Best Disposer of affairs.",
    ),
];

/// Catalogue entries of `category` in catalogue order, everything for `None`.
pub fn by_category(category: Option<DhikrCategory>) -> impl Iterator<Item = &'static Dhikr> {
    ADHKAR
        .iter()
        .filter(move |v| category.map_or(true, |category| v.category == category))
}

/// Rotates through the catalogue one entry per day.
pub fn dhikr_of_the_day(date: NaiveDate) -> &'static Dhikr {
    let day = date.num_days_from_ce().unsigned_abs() as usize;
    &ADHKAR[day % ADHKAR.len()]
}
