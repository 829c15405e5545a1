//! Runtime message templates
//!
//! Templates use the brace syntax of `format!`, but are filled in at run
//! time: `{}` takes the next argument, `{n}` takes argument `n`, and `{{` /
//! `}}` stand for literal braces. Rendering never fails. A template that
//! does not match its arguments renders a visible marker in place of the
//! problem:
//!
//! | situation | marker |
//! |---|---|
//! | `{}` with no argument left | `{!missing}` |
//! | `{n}` past the last argument | `{!missing n}` |
//! | anything else inside braces, or an unpaired brace | `{!bad placeholder}` |
//! | arguments no placeholder used | `{!extra a, b}` appended |

use std::fmt::{self, Write as _};

const BAD_PLACEHOLDER: &str = "{!bad placeholder}";

/// Fill `template` with `args`
pub fn render(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; args.len()];
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => out.push_str(BAD_PLACEHOLDER),
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }

                if !closed {
                    out.push_str(BAD_PLACEHOLDER);
                    break;
                }

                let index = if spec.is_empty() {
                    next += 1;
                    next - 1
                } else if let Ok(index) = spec.parse::<usize>() {
                    index
                } else {
                    out.push_str(BAD_PLACEHOLDER);
                    continue;
                };

                match args.get(index) {
                    Some(arg) => {
                        let _ = write!(out, "{}", arg);
                        used[index] = true;
                    }
                    None if spec.is_empty() => out.push_str("{!missing}"),
                    None => {
                        let _ = write!(out, "{{!missing {}}}", index);
                    }
                }
            }
            c => out.push(c),
        }
    }

    let extra: Vec<String> = args
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(arg, _)| arg.to_string())
        .collect();
    if !extra.is_empty() {
        let _ = write!(out, "{{!extra {}}}", extra.join(", "));
    }

    out
}
