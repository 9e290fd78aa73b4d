//! Parsing of the free-text goal-minute fields. Either `;` or `,` separates the minutes; any
//! token that is not a plain non-negative integer is dropped. Parsing never fails.

use crate::domain::MinuteField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinuteToken {
    Parsed(u16),
    Unparseable,
}
impl MinuteToken {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return MinuteToken::Unparseable;
        }
        match token.parse() {
            Ok(minute) => MinuteToken::Parsed(minute),
            Err(_) => MinuteToken::Unparseable,
        }
    }

    pub fn minute(&self) -> Option<u16> {
        match self {
            MinuteToken::Parsed(minute) => Some(*minute),
            MinuteToken::Unparseable => None,
        }
    }
}

pub fn tokenize(text: &str) -> impl Iterator<Item = MinuteToken> + '_ {
    text.split([';', ',']).map(MinuteToken::parse)
}

/// Minutes in source order.
pub fn parse_text(text: Option<&str>) -> Vec<u16> {
    match text {
        None => vec![],
        Some(text) => tokenize(text).filter_map(|token| token.minute()).collect(),
    }
}

pub fn parse(field: &MinuteField) -> Vec<u16> {
    match field {
        MinuteField::Missing => vec![],
        MinuteField::Text(text) => parse_text(Some(text)),
        MinuteField::Numeric(value) => {
            if value.is_finite() && *value >= 0.0 && value.fract() == 0.0 && *value <= u16::MAX as f64 {
                vec![*value as u16]
            } else {
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_separators() {
        assert_eq!(vec![12, 45], parse_text(Some("12;45;")));
        assert_eq!(vec![7, 23], parse_text(Some("7,abc,23")));
        assert_eq!(vec![3, 17, 88], parse_text(Some(" 3 ; 17,88 ")));
    }

    #[test]
    fn parse_text_empty() {
        assert!(parse_text(Some("")).is_empty());
        assert!(parse_text(None).is_empty());
        assert!(parse_text(Some(";;,")).is_empty());
    }

    #[test]
    fn parse_text_keeps_source_order() {
        assert_eq!(vec![80, 5, 80], parse_text(Some("80;5;80")));
    }

    #[test]
    fn parse_text_drops_non_integers() {
        assert_eq!(vec![10], parse_text(Some("45+2;-3;10;12.5;x")));
        assert!(parse_text(Some("99999999")).is_empty());
    }

    #[test]
    fn tokens() {
        assert_eq!(
            vec![MinuteToken::Parsed(7), MinuteToken::Unparseable, MinuteToken::Parsed(23)],
            tokenize("7,abc;23").collect::<Vec<_>>()
        );
    }

    #[test]
    fn parse_numeric_fallback() {
        assert_eq!(vec![23], parse(&MinuteField::Numeric(23.0)));
        assert!(parse(&MinuteField::Numeric(23.5)).is_empty());
        assert!(parse(&MinuteField::Numeric(-1.0)).is_empty());
        assert!(parse(&MinuteField::Numeric(f64::NAN)).is_empty());
        assert!(parse(&MinuteField::Missing).is_empty());
        assert_eq!(vec![12, 45], parse(&MinuteField::from("12;45;")));
    }
}
