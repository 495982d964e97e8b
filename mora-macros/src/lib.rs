mod utils;

use proc_macro::{TokenStream, TokenTree};

/// Awaits every future concurrently and yields their outputs as a tuple.
///
/// All futures are polled from the same task each time it wakes, so they
/// all start before any of them is awaited to completion. Outputs keep the
/// argument order.
#[proc_macro]
pub fn join(input: TokenStream) -> TokenStream {
    let args = utils::split_args(input);
    let count = args.len();

    if count == 0 {
        return "()".parse().unwrap_or_default();
    }

    if count == 1 {
        let expr = utils::to_source(&args[0]);
        return format!("{{ ({expr}).await }}").parse().unwrap_or_default();
    }

    let mut output = String::from("{\n");

    for (i, expr_tokens) in args.iter().enumerate() {
        let expr = utils::to_source(expr_tokens);
        output.push_str(&format!(
            "let mut __mora_f{i} = ::mora::__private::MaybeDone::new({expr});\n"
        ));
    }

    output.push_str("::std::future::poll_fn(move |cx| {\n");
    output.push_str("    let mut __mora_settled = true;\n");

    for i in 0..count {
        output.push_str(&format!(
            "    __mora_settled &= __mora_f{i}.poll_settled(cx);\n"
        ));
    }

    output.push_str("    if !__mora_settled {\n");
    output.push_str("        return ::std::task::Poll::Pending;\n");
    output.push_str("    }\n");
    output.push_str("    ::std::task::Poll::Ready((\n");

    for i in 0..count {
        output.push_str(&format!("        __mora_f{i}.take_output(),\n"));
    }

    output.push_str("    ))\n");
    output.push_str("}).await\n");
    output.push_str("}\n");

    output.parse().unwrap_or_else(|err| {
        utils::compile_error(&format!("join! expansion failed: {err}"))
    })
}

/// Runs an `async fn main` on a fresh runtime.
///
/// Accepts an optional `seed = N` argument that fixes the random delay
/// sequence.
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    let seed = match utils::parse_seed(attr) {
        Ok(seed) => seed,
        Err(msg) => return utils::compile_error(&msg),
    };

    match utils::wrap_in_runtime(item, seed) {
        Ok(tokens) => tokens.into_iter().collect(),
        Err(msg) => utils::compile_error(&msg),
    }
}

/// Turns an `async fn` into a `#[test]` running on a fresh runtime.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let seed = match utils::parse_seed(attr) {
        Ok(seed) => seed,
        Err(msg) => return utils::compile_error(&msg),
    };

    let tokens = match utils::wrap_in_runtime(item, seed) {
        Ok(tokens) => tokens,
        Err(msg) => return utils::compile_error(&msg),
    };

    let test_attr: TokenStream = "#[::core::prelude::v1::test]".parse().unwrap_or_default();
    let mut result: Vec<TokenTree> = test_attr.into_iter().collect();
    result.extend(tokens);

    result.into_iter().collect()
}
