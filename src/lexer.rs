use crate::token::TokenStream;

/// Split source text into its whitespace-delimited tokens. Any run of
/// non-whitespace is one token; validity is the parser's concern.
pub fn tokenize(source: &str) -> TokenStream {
    TokenStream::new(source.split_whitespace().map(str::to_string).collect())
}
