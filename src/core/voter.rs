//! Voter record, its field table and the voter validation pass.
//!
//! Every field except `name` is optional. The `voter_fields!` table below is
//! the single source for the struct, the JSON key of each field, its type and
//! its constraints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constraints::Constraint::{self, Digits, Email, MaxLength, NotBlank, Range};
use super::data_type::FieldType::{
    self, Boolean, Date, Decimal as DecimalField, Integer, Real, Text, TextList, Timestamp,
    Uuid as UuidField,
};
use super::field::{FieldSpec, Schema};
use super::record::Record;
use super::value::Value;
use super::violation::{Violation, ViolationKind};

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($wire),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Self {
                Value::Text(v.as_str().to_string())
            }
        }
    };
}

wire_enum!(
    /// Campaign classification of a voter's support
    SupportLevel {
        StrongSupport => "strongSupport",
        LeaningSupport => "leaningSupport",
        Undecided => "undecided",
        LeaningOpposition => "leaningOpposition",
        StrongOpposition => "strongOpposition",
    }
);

wire_enum!(
    VoterStatus {
        Active => "active",
        Inactive => "inactive",
        Moved => "moved",
        Deceased => "deceased",
        Unregistered => "unregistered",
    }
);

wire_enum!(
    ContactPreference {
        Phone => "phone",
        Whatsapp => "whatsapp",
        Email => "email",
        Sms => "sms",
        DoorKnock => "doorKnock",
        None => "none",
    }
);

macro_rules! voter_fields {
    ($($field:ident : $ty:ty => $key:literal, $kind:expr, [$($rule:expr),*]);* $(;)?) => {
        /// A voter as stored by the campaign. JSON keys are camelCase.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Voter {
            pub name: String,
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        /// Field table of [`Voter`], in display order
        pub const VOTER_FIELDS: &[FieldSpec] = &[
            FieldSpec::required("name", Text, &[NotBlank, MaxLength { max: 200 }]),
            $(FieldSpec::optional($key, $kind, &[$($rule),*]),)*
        ];

        impl Voter {
            fn lookup(&self, key: &str) -> Option<Value> {
                match key {
                    "name" => Some(Value::Text(self.name.clone())),
                    $($key => Some(self.$field.clone().map_or(Value::Null, Value::from)),)*
                    _ => None,
                }
            }
        }
    };
}

const SUPPORT_LEVEL: FieldType = FieldType::Enum { values: SupportLevel::NAMES };
const VOTER_STATUS: FieldType = FieldType::Enum { values: VoterStatus::NAMES };
const CONTACT_PREFERENCE: FieldType = FieldType::Enum { values: ContactPreference::NAMES };
const SCORE: Constraint = Range { min: 0.0, max: 100.0 };
const COUNT: Constraint = Range { min: 0.0, max: 1_000_000.0 };

voter_fields! {
    // Identity and contact
    id: Uuid => "id", UuidField, [];
    first_name: String => "firstName", Text, [MaxLength { max: 100 }];
    last_name: String => "lastName", Text, [MaxLength { max: 100 }];
    nickname: String => "nickname", Text, [MaxLength { max: 100 }];
    national_id: String => "nationalId", Text, [Digits];
    birth_date: NaiveDate => "birthDate", Date, [];
    age: i64 => "age", Integer, [Range { min: 0.0, max: 130.0 }];
    gender: String => "gender", Text, [MaxLength { max: 40 }];
    email: String => "email", Text, [Email];
    phone: String => "phone", Text, [Digits];
    whatsapp: String => "whatsapp", Text, [Digits];
    secondary_phone: String => "secondaryPhone", Text, [Digits];
    instagram: String => "instagram", Text, [MaxLength { max: 100 }];
    facebook: String => "facebook", Text, [MaxLength { max: 200 }];
    twitter: String => "twitter", Text, [MaxLength { max: 100 }];
    // Address
    street: String => "street", Text, [MaxLength { max: 200 }];
    number: String => "number", Text, [MaxLength { max: 20 }];
    complement: String => "complement", Text, [MaxLength { max: 100 }];
    neighborhood: String => "neighborhood", Text, [MaxLength { max: 100 }];
    city: String => "city", Text, [MaxLength { max: 100 }];
    state: String => "state", Text, [MaxLength { max: 50 }];
    zip_code: String => "zipCode", Text, [Digits];
    latitude: f64 => "latitude", Real, [Range { min: -90.0, max: 90.0 }];
    longitude: f64 => "longitude", Real, [Range { min: -180.0, max: 180.0 }];
    // Electoral registration
    voter_registration: String => "voterRegistration", Text, [Digits];
    electoral_zone: String => "electoralZone", Text, [MaxLength { max: 20 }];
    electoral_section: String => "electoralSection", Text, [MaxLength { max: 20 }];
    polling_place: String => "pollingPlace", Text, [MaxLength { max: 200 }];
    voter_status: VoterStatus => "voterStatus", VOTER_STATUS, [];
    registration_date: NaiveDate => "registrationDate", Date, [];
    last_voted_date: NaiveDate => "lastVotedDate", Date, [];
    voting_frequency: i64 => "votingFrequency", Integer, [SCORE];
    // Socioeconomic
    education: String => "education", Text, [MaxLength { max: 100 }];
    occupation: String => "occupation", Text, [MaxLength { max: 100 }];
    employer: String => "employer", Text, [MaxLength { max: 200 }];
    income_range: String => "incomeRange", Text, [MaxLength { max: 50 }];
    household_size: i64 => "householdSize", Integer, [Range { min: 1.0, max: 50.0 }];
    marital_status: String => "maritalStatus", Text, [MaxLength { max: 40 }];
    religion: String => "religion", Text, [MaxLength { max: 60 }];
    ethnicity: String => "ethnicity", Text, [MaxLength { max: 60 }];
    has_children: bool => "hasChildren", Boolean, [];
    children_count: i64 => "childrenCount", Integer, [Range { min: 0.0, max: 30.0 }];
    // Political classification
    party_affiliation: String => "partyAffiliation", Text, [MaxLength { max: 100 }];
    support_level: SupportLevel => "supportLevel", SUPPORT_LEVEL, [];
    ideology: String => "ideology", Text, [MaxLength { max: 60 }];
    top_issues: Vec<String> => "topIssues", TextList, [];
    influencer_score: i64 => "influencerScore", Integer, [SCORE];
    persuadability: i64 => "persuadability", Integer, [SCORE];
    turnout_likelihood: f64 => "turnoutLikelihood", Real, [Range { min: 0.0, max: 1.0 }];
    previous_candidate: String => "previousCandidate", Text, [MaxLength { max: 200 }];
    // Engagement
    contact_preference: ContactPreference => "contactPreference", CONTACT_PREFERENCE, [];
    is_volunteer: bool => "isVolunteer", Boolean, [];
    is_donor: bool => "isDonor", Boolean, [];
    donation_total: Decimal => "donationTotal", DecimalField, [Range { min: 0.0, max: 1.0e9 }];
    events_attended: i64 => "eventsAttended", Integer, [COUNT];
    door_knocks: i64 => "doorKnocks", Integer, [COUNT];
    calls_received: i64 => "callsReceived", Integer, [COUNT];
    messages_sent: i64 => "messagesSent", Integer, [COUNT];
    engagement_score: i64 => "engagementScore", Integer, [SCORE];
    last_contact_at: DateTime<Utc> => "lastContactAt", Timestamp, [];
    opt_in_sms: bool => "optInSms", Boolean, [];
    opt_in_email: bool => "optInEmail", Boolean, [];
    tags: Vec<String> => "tags", TextList, [];
    notes: String => "notes", Text, [MaxLength { max: 5000 }];
    source: String => "source", Text, [MaxLength { max: 100 }];
    assigned_to: String => "assignedTo", Text, [MaxLength { max: 100 }];
    // Referral linkage
    referred_by: Uuid => "referredBy", UuidField, [];
    referral_count: i64 => "referralCount", Integer, [COUNT];
    // Metadata
    created_at: DateTime<Utc> => "createdAt", Timestamp, [];
    updated_at: DateTime<Utc> => "updatedAt", Timestamp, [];
}

pub static VOTER_SCHEMA: Schema = Schema {
    name: "voter",
    fields: VOTER_FIELDS,
};

impl Voter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Record for Voter {
    fn field(&self, name: &str) -> Option<Value> {
        self.lookup(name)
    }

    fn field_names(&self) -> Vec<String> {
        VOTER_SCHEMA.names().map(str::to_string).collect()
    }

    fn schema() -> Option<&'static Schema> {
        Some(&VOTER_SCHEMA)
    }
}

/// Check a voter against the field table plus the cross-field rules.
///
/// Returns every violation found; an empty list means the voter is valid.
#[must_use]
pub fn validate_voter(voter: &Voter) -> Vec<Violation> {
    let mut violations = Vec::new();

    for spec in VOTER_FIELDS {
        let value = voter.value_of(spec.name);
        if spec.required && value.is_empty_like() {
            violations.push(Violation::new(spec.name, ViolationKind::Required, "is required"));
            continue;
        }
        for rule in spec.constraints {
            if let Some(message) = rule.check(&value) {
                violations.push(Violation::new(spec.name, ViolationKind::Constraint, message));
            }
        }
    }

    if let (Some(id), Some(referrer)) = (voter.id, voter.referred_by) {
        if id == referrer {
            violations.push(Violation::new(
                "referredBy",
                ViolationKind::InvalidValue,
                "a voter cannot refer themselves",
            ));
        }
    }

    if voter.has_children == Some(false) && voter.children_count.is_some_and(|n| n > 0) {
        violations.push(Violation::new(
            "childrenCount",
            ViolationKind::InvalidValue,
            "is positive while hasChildren is false",
        ));
    }

    if let (Some(birth), Some(registered)) = (voter.birth_date, voter.registration_date) {
        if registered < birth {
            violations.push(Violation::new(
                "registrationDate",
                ViolationKind::InvalidValue,
                "is before birthDate",
            ));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_every_field() {
        let voter = Voter::new("Ana");
        assert_eq!(voter.field_names().len(), VOTER_FIELDS.len());
        for spec in VOTER_FIELDS {
            assert!(voter.field(spec.name).is_some(), "no accessor for {}", spec.name);
        }
        assert!(voter.field("favouriteColour").is_none());
    }

    #[test]
    fn test_json_keys_match_schema() {
        let json = serde_json::json!({
            "name": "Ana",
            "zipCode": "01310-100",
            "supportLevel": "leaningSupport",
            "optInSms": true,
            "donationTotal": "12.50",
            "topIssues": ["health", "transport"]
        });
        let voter: Voter = serde_json::from_value(json).unwrap();
        assert_eq!(voter.value_of("zipCode"), Value::Text("01310-100".to_string()));
        assert_eq!(voter.value_of("supportLevel"), Value::Text("leaningSupport".to_string()));
        assert_eq!(voter.value_of("optInSms"), Value::Boolean(true));
        assert_eq!(voter.value_of("topIssues").to_text(), "health,transport");
        assert!(voter.value_of("email").is_null());
    }

    #[test]
    fn test_validate_voter_ok() {
        let mut voter = Voter::new("Ana Souza");
        voter.email = Some("ana@example.com".to_string());
        voter.age = Some(34);
        assert!(validate_voter(&voter).is_empty());
    }

    #[test]
    fn test_validate_voter_reports_every_problem() {
        let mut voter = Voter::new("  ");
        voter.email = Some("not-an-email".to_string());
        voter.age = Some(200);
        voter.has_children = Some(false);
        voter.children_count = Some(2);

        let violations = validate_voter(&voter);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"age"));
        assert!(fields.contains(&"childrenCount"));
    }

    #[test]
    fn test_self_referral_rejected() {
        let id = Uuid::new_v4();
        let mut voter = Voter::new("Bo");
        voter.id = Some(id);
        voter.referred_by = Some(id);
        let violations = validate_voter(&voter);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "referredBy");
    }
}
