use crate::error::{FuzzyError, Result};

/// Parses a comma separated list of membership values such as `"0, 0.5, 1"`.
///
/// Blank entries are skipped. The first token that is not a number is reported
/// as [`FuzzyError::InvalidValue`]; a list with no numbers at all is
/// [`FuzzyError::EmptyInput`]. Values are not clamped to `[0, 1]`.
pub fn parse_values(text: &str) -> Result<Vec<f64>> {
    let values = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(FuzzyError::InvalidValue {
                token: token.to_owned(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Err(FuzzyError::EmptyInput);
    }

    Ok(values)
}

#[test]
fn test_parse_values() {
    assert_eq!(parse_values("0, 0.5 ,1"), Ok(vec![0., 0.5, 1.]));
    assert_eq!(parse_values("1,,2, "), Ok(vec![1., 2.]));
    assert_eq!(parse_values("1.5, -0.25"), Ok(vec![1.5, -0.25]));
}

#[test]
fn test_parse_invalid_values() {
    assert_eq!(
        parse_values("0.1, abc, 0.3"),
        Err(FuzzyError::InvalidValue {
            token: "abc".to_owned()
        })
    );
    assert_eq!(
        parse_values("inf"),
        Err(FuzzyError::InvalidValue {
            token: "inf".to_owned()
        })
    );
    assert_eq!(parse_values(""), Err(FuzzyError::EmptyInput));
    assert_eq!(parse_values(" , ,"), Err(FuzzyError::EmptyInput));
}
