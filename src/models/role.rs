use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Implements `as_str`, `Display` and `FromStr` over the serialized names
/// so enum values can be stored in TEXT columns.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!("unknown {}: {}", stringify!($name), other)),
                }
            }
        }
    };
}

/// Account type carried on the credential row and inside bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthRole {
    #[default]
    User,
    Institute,
}

text_enum!(AuthRole { User => "USER", Institute => "INSTITUTE" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Doctor,
    Nurse,
}

text_enum!(UserRole { Doctor => "DOCTOR", Nurse => "NURSE" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstituteRole {
    #[default]
    Hospital,
    Clinic,
    Lab,
    Pharmacy,
}

text_enum!(InstituteRole {
    Hospital => "HOSPITAL",
    Clinic => "CLINIC",
    Lab => "LAB",
    Pharmacy => "PHARMACY",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

text_enum!(JobStatus { Active => "active", Closed => "closed" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

text_enum!(ApplicationStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_matches_wire_form() {
        assert_eq!(AuthRole::Institute.as_str(), "INSTITUTE");
        assert_eq!(
            serde_json::to_value(AuthRole::Institute).unwrap(),
            serde_json::json!("INSTITUTE")
        );
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Accepted).unwrap(),
            serde_json::json!(ApplicationStatus::Accepted.as_str())
        );
        assert_eq!("PHARMACY".parse::<InstituteRole>(), Ok(InstituteRole::Pharmacy));
        assert!("doctor".parse::<UserRole>().is_err());
    }

    #[test]
    fn defaults_follow_the_schema() {
        assert_eq!(AuthRole::default(), AuthRole::User);
        assert_eq!(UserRole::default(), UserRole::Doctor);
        assert_eq!(InstituteRole::default(), InstituteRole::Hospital);
        assert_eq!(JobStatus::default(), JobStatus::Active);
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }
}
