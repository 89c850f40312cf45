//! Challenge rating - A monster's standardized difficulty, possibly fractional

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ChallengeRating(f64);

impl ChallengeRating {
    /// Returns `None` for negative or non-finite values
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    /// Parse `"1/8"`, `"2"` or `"0.25"` style text
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let value = match text.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().ok()?;
                let den: f64 = den.trim().parse().ok()?;
                if den == 0.0 {
                    return None;
                }
                num / den
            }
            None => text.parse().ok()?,
        };
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Display form, fractions for the sub-1 ratings
    pub fn to_text(&self) -> String {
        const FRACTIONS: [(f64, &str); 3] = [(0.125, "1/8"), (0.25, "1/4"), (0.5, "1/2")];
        FRACTIONS
            .iter()
            .find(|(v, _)| (self.0 - v).abs() < 0.001)
            .map(|(_, text)| (*text).to_string())
            .unwrap_or_else(|| format!("{}", self.0))
    }
}

/// XP award per challenge rating, CR 0 through 30
pub const CR_XP_TABLE: [(f64, f64); 34] = [
    (0.0, 10.0),
    (0.125, 25.0),
    (0.25, 50.0),
    (0.5, 100.0),
    (1.0, 200.0),
    (2.0, 450.0),
    (3.0, 700.0),
    (4.0, 1100.0),
    (5.0, 1800.0),
    (6.0, 2300.0),
    (7.0, 2900.0),
    (8.0, 3900.0),
    (9.0, 5000.0),
    (10.0, 5900.0),
    (11.0, 7200.0),
    (12.0, 8400.0),
    (13.0, 10000.0),
    (14.0, 11500.0),
    (15.0, 13000.0),
    (16.0, 15000.0),
    (17.0, 18000.0),
    (18.0, 20000.0),
    (19.0, 22000.0),
    (20.0, 25000.0),
    (21.0, 33000.0),
    (22.0, 41000.0),
    (23.0, 50000.0),
    (24.0, 62000.0),
    (25.0, 75000.0),
    (26.0, 90000.0),
    (27.0, 105000.0),
    (28.0, 120000.0),
    (29.0, 135000.0),
    (30.0, 155000.0),
];

impl ChallengeRating {
    /// XP award for this rating.
    ///
    /// Exact table rows match within 0.001. Ratings above 30 extrapolate by
    /// 5000 XP per point; anything else takes the nearest row within half a
    /// point, or 0 when no row is that close.
    pub fn xp(&self) -> f64 {
        if let Some((_, xp)) = CR_XP_TABLE.iter().find(|(cr, _)| (cr - self.0).abs() < 0.001) {
            return *xp;
        }
        if self.0 > 30.0 {
            return 155_000.0 + (self.0 - 30.0) * 5_000.0;
        }
        CR_XP_TABLE
            .iter()
            .map(|(cr, xp)| ((cr - self.0).abs(), *xp))
            .filter(|(diff, _)| *diff < 0.5)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, xp)| xp)
            .unwrap_or(0.0)
    }
}

impl Serialize for ChallengeRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for ChallengeRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => ChallengeRating::new(n)
                .ok_or_else(|| de::Error::custom(format!("invalid challenge rating {}", n))),
            Raw::Text(t) => ChallengeRating::parse(&t)
                .ok_or_else(|| de::Error::custom(format!("invalid challenge rating {:?}", t))),
        }
    }
}
