use proc_macro::{Delimiter, Group, Spacing, TokenStream, TokenTree};

/// Splits a `TokenStream` into comma-separated arguments.
///
/// Commas nested inside groups (`(..)`, `{..}`, `[..]`) belong to their
/// group and are not separators. Empty arguments, such as the one after a
/// trailing comma, are dropped.
pub(crate) fn split_args(input: TokenStream) -> Vec<Vec<TokenTree>> {
    let mut args = Vec::new();
    let mut current = Vec::new();

    for token in input {
        match &token {
            TokenTree::Punct(p) if p.as_char() == ',' => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(token),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Renders tokens back to Rust source.
///
/// Going through `TokenStream` keeps the compiler's own spacing rules,
/// so `5 as i64` never collapses into `5as i64`.
pub(crate) fn to_source(tokens: &[TokenTree]) -> String {
    tokens.iter().cloned().collect::<TokenStream>().to_string()
}

/// Reads the optional `seed = N` argument of `#[mora::main]` and
/// `#[mora::test]`.
pub(crate) fn parse_seed(attr: TokenStream) -> Result<Option<u64>, String> {
    let mut seed = None;

    for arg in split_args(attr) {
        let source = to_source(&arg);
        let Some((key, value)) = source.split_once('=') else {
            return Err(format!("expected `key = value`, found `{}`", source.trim()));
        };

        match key.trim() {
            "seed" => {
                let value = value.trim().trim_end_matches("u64").replace('_', "");
                let parsed = value
                    .parse::<u64>()
                    .map_err(|_| format!("`seed` must be an integer literal, found `{value}`"))?;
                seed = Some(parsed);
            }
            other => return Err(format!("unknown attribute argument `{other}`")),
        }
    }

    Ok(seed)
}

/// Builds a `compile_error!` invocation carrying `message`.
pub(crate) fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({message:?});")
        .parse()
        .unwrap_or_default()
}

/// Returns the source of the type after `->` in a function signature.
fn return_type(signature: &[TokenTree]) -> Option<String> {
    let arrow = signature.windows(2).position(|pair| {
        matches!(
            pair,
            [TokenTree::Punct(dash), TokenTree::Punct(gt)]
                if dash.as_char() == '-' && dash.spacing() == Spacing::Joint && gt.as_char() == '>'
        )
    })?;

    let rest = &signature[arrow + 2..];
    let end = rest
        .iter()
        .position(|t| matches!(t, TokenTree::Ident(id) if id.to_string() == "where"))
        .unwrap_or(rest.len());

    Some(to_source(&rest[..end]))
}

/// Replaces the body of an `async fn` with a runtime that drives it.
///
/// The `async` keyword is removed and the last brace group (the body)
/// becomes `RuntimeBuilder::new()...build().block_on(async move { body })`.
/// The value of the body is returned unchanged, so `main` and tests may
/// return a `Result`.
pub(crate) fn wrap_in_runtime(item: TokenStream, seed: Option<u64>) -> Result<Vec<TokenTree>, String> {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let Some(async_pos) = tokens
        .iter()
        .position(|t| matches!(t, TokenTree::Ident(id) if id.to_string() == "async"))
    else {
        return Err("the function must be declared `async`".to_owned());
    };
    tokens.remove(async_pos);

    let Some(body_pos) = tokens
        .iter()
        .rposition(|t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace))
    else {
        return Err("expected a function body".to_owned());
    };

    let body = match &tokens[body_pos] {
        TokenTree::Group(g) => g.stream().to_string(),
        _ => unreachable!(),
    };

    let output = return_type(&tokens[..body_pos]).unwrap_or_else(|| "()".to_owned());

    let mut builder = String::from("::mora::RuntimeBuilder::new()");
    if let Some(seed) = seed {
        builder.push_str(&format!(".seed({seed}u64)"));
    }
    builder.push_str(".build()");

    // The explicit output type lets `?` in the body infer its error type.
    let new_body = format!(
        "{{
            let body: ::std::pin::Pin<&mut dyn ::std::future::Future<Output = {output}>> =
                ::std::pin::pin!(async move {{ {body} }});
            let runtime = {builder};
            runtime.block_on(body)
        }}"
    );

    let stream: TokenStream = new_body.parse().map_err(|err| format!("{err}"))?;
    tokens[body_pos] = TokenTree::Group(Group::new(Delimiter::Brace, stream));

    Ok(tokens)
}
