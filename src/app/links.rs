const SCHEMES: [&str; 2] = ["http://", "https://"];

// Sentence punctuation and closing delimiters that end up glued to a link.
// `)` is handled separately since links may contain balanced parens.
const TRAILERS: &[char] = &['.', ',', ';', ':', '!', '?', '>', ']', '}', '"', '\''];

/// Every `http://` or `https://` link in `text`, in reading order.
///
/// Links are found per whitespace-separated token, so at most one link is
/// taken from each token. Anything before the scheme (`<`, `(`, `href="`, a
/// markdown label) is skipped.
pub fn extract_links(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(link_in)
        .map(str::to_owned)
        .collect()
}

fn link_in(token: &str) -> Option<&str> {
    let start = SCHEMES.iter().filter_map(|scheme| token.find(scheme)).min()?;
    let link = trim_trailers(&token[start..]);
    SCHEMES
        .iter()
        .any(|scheme| link.len() > scheme.len() && link.starts_with(scheme))
        .then_some(link)
}

fn trim_trailers(mut link: &str) -> &str {
    loop {
        let trimmed = link.trim_end_matches(TRAILERS);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(rest) if trimmed.matches(')').count() > trimmed.matches('(').count() => rest,
            _ => trimmed,
        };
        if trimmed.len() == link.len() {
            return link;
        }
        link = trimmed;
    }
}
