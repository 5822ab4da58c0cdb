//! The `ulog!` entry-point macro.
//!
//! The expansion has two halves, mirroring the two halves of a log call:
//!
//! - **compile time**: a 256-byte `CallsiteRecord` static placed in the
//!   `ulog_metadata` link section, carrying severity, line, file, the
//!   format string verbatim, and the packed argument typecode;
//! - **run time**: the identifier derived from the record's address and
//!   one monomorphic marshalling call per argument against the registered
//!   engine.
//!
//! Argument types come from `{=type}` hints inside the format string
//! (`u8`, `i8`, `bool`, `u16`, `i16`, `u32`, `i32`, `f32`, `str`,
//! `ptr16`), optionally followed by a display refinement after a colon
//! (`{=u8:02x}`) which is stored, not interpreted. The generated calls
//! pin each argument to its hinted type, so a mismatch, or an unhintable
//! type such as `u64`, fails to compile. `{{` and `}}` escape literal
//! braces.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Expr, Ident, LitStr, Token};

struct LogInput {
    level: Ident,
    fmt: LitStr,
    args: Vec<Expr>,
}

impl Parse for LogInput {
    fn parse(input: ParseStream) -> syn::Result<LogInput> {
        let level: Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let fmt: LitStr = input.parse()?;

        let mut args = Vec::new();
        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            args.push(input.parse()?);
        }

        Ok(LogInput { level, fmt, args })
    }
}

const LEVELS: &[&str] = &[
    "Error", "Warn", "Mile", "Info", "Trace", "Debug0", "Debug1", "Debug2", "Debug3",
];

const MAX_ARGS: usize = 8;

#[derive(Copy, Clone)]
enum Hint {
    U8,
    I8,
    Bool,
    U16,
    I16,
    U32,
    I32,
    F32,
    Str,
    Ptr16,
}

impl Hint {
    fn from_name(name: &str) -> Option<Hint> {
        Some(match name {
            "u8" => Hint::U8,
            "i8" => Hint::I8,
            "bool" => Hint::Bool,
            "u16" => Hint::U16,
            "i16" => Hint::I16,
            "u32" => Hint::U32,
            "i32" => Hint::I32,
            "f32" => Hint::F32,
            "str" => Hint::Str,
            "ptr16" => Hint::Ptr16,
            _ => return None,
        })
    }

    /// The `ArgKind` variant stored in the typecode.
    fn kind(self) -> &'static str {
        match self {
            Hint::U8 => "U8",
            Hint::I8 => "S8",
            Hint::Bool => "Bool",
            Hint::U16 => "U16",
            Hint::I16 => "S16",
            Hint::U32 => "U32",
            Hint::I32 => "S32",
            Hint::F32 => "Float32",
            Hint::Str => "Str",
            Hint::Ptr16 => "Ptr16",
        }
    }

    /// The `CallWriter` method that marshals (and thereby type-checks)
    /// the argument.
    fn method(self) -> &'static str {
        match self {
            Hint::U8 => "u8",
            Hint::I8 => "i8",
            Hint::Bool => "bool",
            Hint::U16 => "u16",
            Hint::I16 => "i16",
            Hint::U32 => "u32",
            Hint::I32 => "i32",
            Hint::F32 => "f32",
            Hint::Str => "str",
            Hint::Ptr16 => "ptr16",
        }
    }
}

/// Extracts the type hints of all placeholders, in order.
fn placeholders(fmt: &str) -> Result<Vec<Hint>, String> {
    let mut hints = Vec::new();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    continue;
                }
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if !closed {
                    return Err("unterminated placeholder in format string".into());
                }
                let body = inner.strip_prefix('=').ok_or_else(|| {
                    format!(
                        "placeholder `{{{}}}` is missing its type hint, e.g. `{{=u8}}`",
                        inner
                    )
                })?;
                let name = body.split(':').next().unwrap_or(body);
                let hint = Hint::from_name(name).ok_or_else(|| {
                    format!(
                        "unknown type hint `{}`; expected one of u8, i8, bool, u16, i16, \
                         u32, i32, f32, str, ptr16",
                        name
                    )
                })?;
                hints.push(hint);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    continue;
                }
                return Err("stray `}` in format string; escape it as `}}`".into());
            }
            _ => {}
        }
    }

    Ok(hints)
}

#[proc_macro]
pub fn ulog(input: TokenStream) -> TokenStream {
    let LogInput { level, fmt, args } = parse_macro_input!(input as LogInput);

    if !LEVELS.contains(&level.to_string().as_str()) {
        return syn::Error::new(
            level.span(),
            format!(
                "unknown level `{}`; expected one of {}",
                level,
                LEVELS.join(", ")
            ),
        )
        .to_compile_error()
        .into();
    }

    let hints = match placeholders(&fmt.value()) {
        Ok(hints) => hints,
        Err(message) => {
            return syn::Error::new(fmt.span(), message)
                .to_compile_error()
                .into();
        }
    };

    if hints.len() != args.len() {
        return syn::Error::new(
            fmt.span(),
            format!(
                "format string has {} placeholder(s) but {} argument(s) were passed",
                hints.len(),
                args.len()
            ),
        )
        .to_compile_error()
        .into();
    }

    if hints.len() > MAX_ARGS {
        return syn::Error::new(
            fmt.span(),
            format!("a log call takes at most {} arguments", MAX_ARGS),
        )
        .to_compile_error()
        .into();
    }

    let kinds: Vec<Ident> = hints.iter().map(|h| format_ident!("{}", h.kind())).collect();
    let methods: Vec<Ident> = hints
        .iter()
        .map(|h| format_ident!("{}", h.method()))
        .collect();

    let writer = if args.is_empty() {
        quote! {
            let __ulog_writer = ::ulog::arguments::CallWriter::new(
                __ulog_engine,
                ::ulog::callsite::callsite_id(&__ULOG_CALLSITE),
            );
        }
    } else {
        quote! {
            let mut __ulog_writer = ::ulog::arguments::CallWriter::new(
                __ulog_engine,
                ::ulog::callsite::callsite_id(&__ULOG_CALLSITE),
            );
            #( __ulog_writer.#methods(#args); )*
        }
    };

    quote! {{
        #[link_section = "ulog_metadata"]
        #[used]
        static __ULOG_CALLSITE: ::ulog::callsite::CallsiteRecord =
            ::ulog::callsite::CallsiteRecord::new(
                ::ulog::Level::#level,
                ::core::line!(),
                ::ulog::arguments::typecode(&[
                    #( ::ulog::arguments::ArgKind::#kinds ),*
                ]),
                ::core::file!(),
                #fmt,
            );

        if let ::core::option::Option::Some(__ulog_engine) = ::ulog::engine() {
            #writer
            __ulog_writer.finish();
        }
    }}
    .into()
}
