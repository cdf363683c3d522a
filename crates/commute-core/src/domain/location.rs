use serde::{Deserialize, Serialize};
use std::fmt;

/// `"lat,lng"` 形式の座標文字列。
///
/// 外部サービスにはこの文字列をそのまま渡すため、パースはしない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinates(String);

impl Coordinates {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered place: either somewhere people live or somewhere they work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(alias = "isWorkPlace", default)]
    pub is_workplace: bool,
}

impl Location {
    pub fn dwelling(name: impl Into<String>, coordinates: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(coordinates),
            is_workplace: false,
        }
    }

    pub fn workplace(name: impl Into<String>, coordinates: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(coordinates),
            is_workplace: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::snake_case(
        r#"{"name":"Office","coordinates":"34.03,-118.45","is_workplace":true}"#,
        true
    )]
    #[case::camel_case(
        r#"{"name":"Office","coordinates":"34.03,-118.45","isWorkPlace":true}"#,
        true
    )]
    #[case::missing_flag(r#"{"name":"Home","coordinates":"33.96,-118.36"}"#, false)]
    fn workplace_flag_is_read_from_either_spelling(#[case] row: &str, #[case] expected: bool) {
        let location: Location = serde_json::from_str(row).unwrap();
        assert_eq!(location.is_workplace, expected);
    }

    #[test]
    fn coordinates_are_kept_verbatim() {
        let home = Location::dwelling("Home", "33.964915,-118.363236");
        assert_eq!(home.coordinates.as_str(), "33.964915,-118.363236");
        assert!(!home.is_workplace);
    }
}
