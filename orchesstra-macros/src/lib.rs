use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Creates a `Square` at compile time from a string literal.
///
/// The key is validated while compiling, so a typo such as `"i9"` becomes a
/// compile error instead of a runtime parse failure.
///
/// # Format
///
/// The format is `<file><rank>` where:
/// - `file` is a letter from `a` to `h` (case-insensitive)
/// - `rank` is a digit from `1` to `8`
///
/// # Examples
///
/// ```ignore
/// use orchesstra::square;
///
/// let e4 = square!("e4");
/// assert_eq!(e4.to_string(), "e4");
/// ```
#[proc_macro]
pub fn square(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let key = input.value();

    match parse_square(&key) {
        Ok((file, rank)) => {
            let expanded = quote! {
                {
                    orchesstra::chess::Square::new(#file, #rank)
                }
            };

            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid square '{}': {}", key, e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

fn parse_square(s: &str) -> Result<(u8, u8), String> {
    let mut chars = s.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err("expected a file letter followed by a rank digit".to_string());
    };

    let file = match file.to_ascii_lowercase() {
        f @ 'a'..='h' => f as u8 - b'a',
        other => return Err(format!("invalid file '{}'", other)),
    };

    let rank = match rank {
        r @ '1'..='8' => r as u8 - b'1',
        other => return Err(format!("invalid rank '{}'", other)),
    };

    Ok((file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("a1"), Ok((0, 0)));
        assert_eq!(parse_square("e4"), Ok((4, 3)));
        assert_eq!(parse_square("H8"), Ok((7, 7)));
    }

    #[test]
    fn test_parse_square_rejects_garbage() {
        assert!(parse_square("").is_err());
        assert!(parse_square("e").is_err());
        assert!(parse_square("i4").is_err());
        assert!(parse_square("e9").is_err());
        assert!(parse_square("e0").is_err());
        assert!(parse_square("e44").is_err());
    }
}
