//! Parsing of textual colors back into [`Rgba`].
//!
//! Understood notations:
//!
//! - Hex: `#rgb`, `#rrggbb`, `#rrggbbaa`
//! - Functional: `rgb(255, 0, 0)`, `rgba(255, 0, 0, 0.5)`, and the
//!   space-separated `rgb(255 0 0 / 50%)` form
//!
//! Functional notation is tokenized with `cssparser`, so comments, odd
//! whitespace and percentages are handled the way a browser would.

use cssparser::{ParseError, Parser, ParserInput, Token};

use super::{hex_to_rgba, Rgba};

/// Parses a hex or `rgb()`/`rgba()` color. Anything else yields `None`.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    parse_color_function(value)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    // 3-digit shorthand: #rgb -> #rrggbb
    if hex.len() == 3 {
        let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
        return hex_to_rgba(&expanded).ok();
    }
    hex_to_rgba(hex).ok()
}

fn parse_color_function(value: &str) -> Option<Rgba> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);

    let name = parser.expect_function().ok()?.to_ascii_lowercase();
    if name != "rgb" && name != "rgba" {
        return None;
    }

    let [r, g, b, a] = parser.parse_nested_block(parse_channels).ok()?;
    parser.expect_exhausted().ok()?;

    Some(Rgba::new(r, g, b, a))
}

/// Parses the arguments of `rgb()`/`rgba()` into `[r, g, b, a]` in `[0, 1]`.
fn parse_channels<'i>(parser: &mut Parser<'i, '_>) -> Result<[f64; 4], ParseError<'i, ()>> {
    let mut channels = [0.0, 0.0, 0.0, 1.0];

    for (index, slot) in channels.iter_mut().enumerate() {
        let is_alpha = index == 3;
        if index > 0 {
            // Legacy syntax separates with commas; modern syntax uses spaces
            // and a slash before alpha.
            let _ = parser.try_parse(|p| p.expect_comma());
            if is_alpha {
                let _ = parser.try_parse(|p| p.expect_delim('/'));
            }
        }
        if is_alpha && parser.is_exhausted() {
            break;
        }
        *slot = parse_channel(parser, is_alpha)?;
    }

    parser.expect_exhausted()?;
    Ok(channels)
}

fn parse_channel<'i>(parser: &mut Parser<'i, '_>, is_alpha: bool) -> Result<f64, ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } if is_alpha => Ok(value as f64),
        Token::Number { value, .. } => Ok(value as f64 / 255.0),
        Token::Percentage { unit_value, .. } => Ok(unit_value as f64),
        other => Err(location.new_unexpected_token_error(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgba(color: Option<Rgba>, expected: (u8, u8, u8, f64)) {
        let color = color.expect("color should parse");
        assert_eq!(
            (
                (color.r * 255.0).round() as u8,
                (color.g * 255.0).round() as u8,
                (color.b * 255.0).round() as u8,
            ),
            (expected.0, expected.1, expected.2)
        );
        assert!((color.a - expected.3).abs() < 1e-6, "alpha {}", color.a);
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_rgba(parse_color("#ff6b35"), (255, 107, 53, 1.0));
        assert_rgba(parse_color("#fff"), (255, 255, 255, 1.0));
        assert_rgba(parse_color("#00000080"), (0, 0, 0, 128.0 / 255.0));
        assert_rgba(parse_color("  #ABCDEF "), (171, 205, 239, 1.0));
    }

    #[test]
    fn test_parse_rgb_legacy() {
        assert_rgba(parse_color("rgb(255, 0, 0)"), (255, 0, 0, 1.0));
        assert_rgba(parse_color("rgba(0, 128, 255, 0.5)"), (0, 128, 255, 0.5));
        assert_rgba(parse_color("RGBA(10,20,30,1)"), (10, 20, 30, 1.0));
    }

    #[test]
    fn test_parse_rgb_modern() {
        assert_rgba(parse_color("rgb(255 0 0)"), (255, 0, 0, 1.0));
        assert_rgba(parse_color("rgb(255 0 0 / 50%)"), (255, 0, 0, 0.5));
    }

    #[test]
    fn test_parse_rgb_percent_channels() {
        assert_rgba(parse_color("rgb(100%, 0%, 50%)"), (255, 0, 128, 1.0));
    }

    #[test]
    fn test_parse_rejects_other_notations() {
        assert!(parse_color("red").is_none());
        assert!(parse_color("hsl(0, 100%, 50%)").is_none());
        assert!(parse_color("#12").is_none());
        assert!(parse_color("16").is_none());
        assert!(parse_color("").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_functions() {
        assert!(parse_color("rgb(255, 0)").is_none());
        assert!(parse_color("rgb(255, 0, 0, 1, 1)").is_none());
        assert!(parse_color("rgb(a, b, c)").is_none());
        assert!(parse_color("rgb(255, 0, 0) extra").is_none());
    }
}
