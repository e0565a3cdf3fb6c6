use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::locale::{pick, Language, Localized};

use super::{record_store::Record, singleton::Singleton};

/// Records that belong to a calendar date. Used for date filters, monthly totals and sorting.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Records carrying a money amount that contributes to totals.
pub trait Amount {
    fn amount(&self) -> f64;
}

mod record_date {
    use chrono::NaiveDate;
    use serde::{self, de::Error, Deserialize, Deserializer, Serializer};

    use crate::utils::time::{format_record_date, parse_record_date};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_record_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_record_date(&s).ok_or_else(|| D::Error::custom(format!("invalid record date {s:?}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Running,
    Training,
    Rest,
    Competition,
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Running,
        ActivityType::Training,
        ActivityType::Rest,
        ActivityType::Competition,
        ActivityType::Other,
    ];
}

impl Localized for ActivityType {
    fn label(&self, language: Language) -> &'static str {
        match self {
            ActivityType::Running => pick(language, "جري", "Running"),
            ActivityType::Training => pick(language, "تدريب", "Training"),
            ActivityType::Rest => pick(language, "راحة", "Rest"),
            ActivityType::Competition => pick(language, "منافسة", "Competition"),
            ActivityType::Other => pick(language, "أخرى", "Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "record_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub kind: ActivityType,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<ActivityType>,
    pub completed: Option<bool>,
}

impl Record for Activity {
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;

    const DEFAULT_KEY: &'static str = "activities";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, created_at: DateTime<Utc>, draft: ActivityDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            kind: draft.kind,
            completed: draft.completed,
            created_at,
        }
    }

    fn apply(&mut self, patch: ActivityPatch, _now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

impl Dated for Activity {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Eggs,
    Raisins,
    Almonds,
    Water,
    Rice,
    Yogurt,
    Other,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Eggs,
        FoodCategory::Raisins,
        FoodCategory::Almonds,
        FoodCategory::Water,
        FoodCategory::Rice,
        FoodCategory::Yogurt,
        FoodCategory::Other,
    ];
}

impl Localized for FoodCategory {
    fn label(&self, language: Language) -> &'static str {
        match self {
            FoodCategory::Eggs => pick(language, "البيض", "Eggs"),
            FoodCategory::Raisins => pick(language, "الزبيب", "Raisins"),
            FoodCategory::Almonds => pick(language, "اللوز", "Almonds"),
            FoodCategory::Water => pick(language, "الماء", "Water"),
            FoodCategory::Rice => pick(language, "الأرز", "Rice"),
            FoodCategory::Yogurt => pick(language, "الياغورت", "Yogurt"),
            FoodCategory::Other => pick(language, "أخرى", "Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodExpense {
    pub id: String,
    pub category: FoodCategory,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(with = "record_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl FoodExpense {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodExpenseDraft {
    pub category: FoodCategory,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodExpensePatch {
    pub category: Option<FoodCategory>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl Record for FoodExpense {
    type Draft = FoodExpenseDraft;
    type Patch = FoodExpensePatch;

    const DEFAULT_KEY: &'static str = "food-expenses";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, created_at: DateTime<Utc>, draft: FoodExpenseDraft) -> Self {
        Self {
            id,
            category: draft.category,
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
            date: draft.date,
            created_at,
        }
    }

    fn apply(&mut self, patch: FoodExpensePatch, _now: DateTime<Utc>) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

impl Dated for FoodExpense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amount for FoodExpense {
    fn amount(&self) -> f64 {
        self.line_total()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralExpense {
    pub id: String,
    /// Free text label, e.g. "rent" or "transport".
    #[serde(rename = "type")]
    pub label: String,
    pub price: f64,
    #[serde(with = "record_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralExpenseDraft {
    pub label: String,
    pub price: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralExpensePatch {
    pub label: Option<String>,
    pub price: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl Record for GeneralExpense {
    type Draft = GeneralExpenseDraft;
    type Patch = GeneralExpensePatch;

    const DEFAULT_KEY: &'static str = "general-expenses";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, created_at: DateTime<Utc>, draft: GeneralExpenseDraft) -> Self {
        Self {
            id,
            label: draft.label,
            price: draft.price,
            date: draft.date,
            created_at,
        }
    }

    fn apply(&mut self, patch: GeneralExpensePatch, _now: DateTime<Utc>) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

impl Dated for GeneralExpense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amount for GeneralExpense {
    fn amount(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    /// Money lent to the counterparty.
    OwedToMe,
    /// Money borrowed from the counterparty.
    OwedByMe,
}

impl Localized for DebtKind {
    fn label(&self, language: Language) -> &'static str {
        match self {
            DebtKind::OwedToMe => pick(language, "لي عندهم", "Owed to me"),
            DebtKind::OwedByMe => pick(language, "عليّ لهم", "I owe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    /// Counterparty
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: DebtKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtDraft {
    pub name: String,
    pub phone: Option<String>,
    pub amount: f64,
    pub kind: DebtKind,
    pub notes: Option<String>,
}

/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtPatch {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub amount: Option<f64>,
    pub kind: Option<DebtKind>,
    pub notes: Option<Option<String>>,
}

impl Record for Debt {
    type Draft = DebtDraft;
    type Patch = DebtPatch;

    const DEFAULT_KEY: &'static str = "debts";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, created_at: DateTime<Utc>, draft: DebtDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            amount: draft.amount,
            kind: draft.kind,
            notes: draft.notes,
            created_at,
            updated_at: created_at,
        }
    }

    fn apply(&mut self, patch: DebtPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.updated_at = now;
    }
}

impl Amount for Debt {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

impl Singleton for UserProfile {
    type Patch = UserProfilePatch;

    const DEFAULT_KEY: &'static str = "profile";

    fn apply(&mut self, patch: UserProfilePatch) {
        let UserProfilePatch {
            name,
            phone,
            address,
            email,
            facebook,
            instagram,
            twitter,
        } = patch;
        for (field, value) in [
            (&mut self.name, name),
            (&mut self.phone, phone),
            (&mut self.address, address),
            (&mut self.email, email),
            (&mut self.facebook, facebook),
            (&mut self.instagram, instagram),
            (&mut self.twitter, twitter),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Lifetime count of dhikr across all tasbeeh sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TasbeehTally {
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyChange {
    Add(u64),
    /// Never goes below zero.
    Subtract(u64),
    Reset,
}

impl Singleton for TasbeehTally {
    type Patch = TallyChange;

    const DEFAULT_KEY: &'static str = "tasbeeh";

    fn apply(&mut self, patch: TallyChange) {
        self.total_count = match patch {
            TallyChange::Add(v) => self.total_count.saturating_add(v),
            TallyChange::Subtract(v) => self.total_count.saturating_sub(v),
            TallyChange::Reset => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::store::{record_store::Record, singleton::Singleton};

    use super::{
        Activity, ActivityType, Debt, DebtDraft, DebtKind, DebtPatch, FoodCategory, FoodExpense,
        GeneralExpense, TallyChange, TasbeehTally, UserProfile, UserProfilePatch,
    };

    #[test]
    fn test_activity_reads_browser_layout() -> anyhow::Result<()> {
        let raw = r#"{
            "id": "7f1c",
            "title": "Morning Run",
            "description": "",
            "date": "2024-03-01",
            "type": "running",
            "completed": false,
            "createdAt": "2024-02-28T18:04:11.120Z"
        }"#;
        let activity: Activity = serde_json::from_str(raw)?;
        assert_eq!(activity.kind, ActivityType::Running);
        assert_eq!(activity.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let value = serde_json::to_value(&activity)?;
        assert_eq!(value["type"], "running");
        assert_eq!(value["date"], "2024-03-01");
        assert!(value.get("createdAt").is_some());
        Ok(())
    }

    #[test]
    fn test_activity_accepts_timestamp_dates() -> anyhow::Result<()> {
        let raw = r#"{"id":"1","title":"Match","date":"2024-05-10T16:00","type":"competition","createdAt":"2024-05-01T00:00:00Z"}"#;
        let activity: Activity = serde_json::from_str(raw)?;
        assert_eq!(activity.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert!(!activity.completed);
        assert!(activity.description.is_empty());
        Ok(())
    }

    #[test]
    fn test_expense_field_names() -> anyhow::Result<()> {
        let raw = r#"[{"id":"1709251200000","category":"almonds","name":"Almonds 500g","price":450,"quantity":2,"date":"2024-03-01","createdAt":"2024-03-01T10:00:00.000Z"}]"#;
        let expenses: Vec<FoodExpense> = serde_json::from_str(raw)?;
        assert_eq!(expenses[0].category, FoodCategory::Almonds);
        assert_eq!(expenses[0].line_total(), 900.);

        let raw = r#"{"id":"1","type":"Transport","price":120.5,"date":"2024-03-02","createdAt":"2024-03-02T10:00:00Z"}"#;
        let expense: GeneralExpense = serde_json::from_str(raw)?;
        assert_eq!(expense.label, "Transport");
        Ok(())
    }

    #[test]
    fn test_debt_update_touches_updated_at() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let mut debt = Debt::create(
            "d1".into(),
            created,
            DebtDraft {
                name: "Karim".into(),
                phone: Some("0555".into()),
                amount: 500.,
                kind: DebtKind::OwedToMe,
                notes: None,
            },
        );
        assert_eq!(debt.updated_at, created);

        debt.apply(
            DebtPatch {
                phone: Some(None),
                amount: Some(300.),
                ..Default::default()
            },
            later,
        );
        assert_eq!(debt.phone, None);
        assert_eq!(debt.amount, 300.);
        assert_eq!(debt.name, "Karim");
        assert_eq!(debt.created_at, created);
        assert_eq!(debt.updated_at, later);
    }

    #[test]
    fn test_profile_missing_fields_default_to_empty() -> anyhow::Result<()> {
        let mut profile: UserProfile = serde_json::from_str(r#"{"name":"Samir"}"#)?;
        assert_eq!(profile.name, "Samir");
        assert_eq!(profile.email, "");

        profile.apply(UserProfilePatch {
            email: Some("samir@example.com".into()),
            ..Default::default()
        });
        assert_eq!(profile.name, "Samir");
        assert_eq!(profile.email, "samir@example.com");
        Ok(())
    }

    #[test]
    fn test_tally_never_negative() {
        let mut tally = TasbeehTally { total_count: 1 };
        tally.apply(TallyChange::Subtract(3));
        assert_eq!(tally.total_count, 0);
        tally.apply(TallyChange::Add(33));
        assert_eq!(tally.total_count, 33);
        tally.apply(TallyChange::Reset);
        assert_eq!(tally, TasbeehTally::default());
    }
}
