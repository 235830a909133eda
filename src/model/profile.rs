//! User profile record

/// Sexual orientation derived from the raw profile field
///
/// The site reports the field as a gender value; it is reinterpreted by
/// comparing it against the profile's own gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexOrientation {
    SameSex,
    OppositeSex,
}

impl SexOrientation {
    /// Derives the category from the raw field value and the gender value
    pub fn from_raw(raw: &str, gender: &str) -> Self {
        if raw == gender {
            Self::SameSex
        } else {
            Self::OppositeSex
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameSex => "same-sex",
            Self::OppositeSex => "opposite-sex",
        }
    }
}

/// A user profile assembled from the info page and the counts page
///
/// Every field except the id is optional: the info page tolerates missing
/// labels, and the counters arrive from a second fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: u64,
    pub nick_name: Option<String>,
    pub gender: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub brief_introduction: Option<String>,
    pub birthday: Option<String>,
    pub sex_orientation: Option<SexOrientation>,
    pub sentiment: Option<String>,
    pub vip_level: Option<String>,
    pub authentication: Option<String>,
    pub labels: Option<String>,
    pub tweet_count: Option<u64>,
    pub follow_count: Option<u64>,
    pub fan_count: Option<u64>,
    pub crawl_time: i64,
}

impl Profile {
    /// An empty profile for the given user id
    pub fn new(id: u64, crawl_time: i64) -> Self {
        Self {
            id,
            nick_name: None,
            gender: None,
            province: None,
            city: None,
            brief_introduction: None,
            birthday: None,
            sex_orientation: None,
            sentiment: None,
            vip_level: None,
            authentication: None,
            labels: None,
            tweet_count: None,
            follow_count: None,
            fan_count: None,
            crawl_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_same_value_is_same_sex() {
        assert_eq!(SexOrientation::from_raw("男", "男"), SexOrientation::SameSex);
    }

    #[test]
    fn test_orientation_different_value_is_opposite_sex() {
        assert_eq!(
            SexOrientation::from_raw("女", "男"),
            SexOrientation::OppositeSex
        );
    }
}
