pub mod driving_tip;
pub mod question;
pub mod resource;
pub mod search;
pub mod state;
pub mod subscription;

use handle_errors::Error;
use percent_encoding::percent_decode_str;

/// Path parameters arrive percent-encoded, e.g. `General%20Knowledge`.
pub(crate) fn decode_segment(segment: &str) -> Result<String, Error> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(Error::InvalidEncoding)
}

pub(crate) fn parse_state_id(state_id: &str) -> Result<crate::types::state::StateId, Error> {
    state_id
        .parse::<i32>()
        .map(crate::types::state::StateId)
        .map_err(Error::ParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_spaces_and_apostrophes() {
        assert_eq!(
            decode_segment("General%20Knowledge").unwrap(),
            "General Knowledge"
        );
        assert_eq!(
            decode_segment("Driver%27s%20Manual").unwrap(),
            "Driver's Manual"
        );
        assert_eq!(decode_segment("Safety").unwrap(), "Safety");
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(
            decode_segment("%FF%FE"),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn state_ids_must_be_numeric() {
        assert_eq!(parse_state_id("5").unwrap().0, 5);
        assert!(matches!(parse_state_id("ca"), Err(Error::ParseError(_))));
    }
}
