//! Shader program asset.

use std::borrow::Cow;

use crate::render::RenderError;

/// Vertex stage entry point name.
pub const VERTEX_ENTRY: &str = "vertexMain";

/// Fragment stage entry point name.
pub const FRAGMENT_ENTRY: &str = "fragmentMain";

/// WGSL program with one vertex and one fragment entry point.
///
/// Bind slots are fixed: vertex buffer 0 (vertices), vertex buffer 1
/// (instances), group 0 binding 2 (camera), group 1 binding 0 (texture).
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub label: Cow<'static, str>,
    pub source: Cow<'static, str>,
    pub vertex_entry: Cow<'static, str>,
    pub fragment_entry: Cow<'static, str>,
}

impl ShaderProgram {
    /// The built-in cube program.
    pub fn cube() -> Self {
        Self {
            label: Cow::Borrowed("cube"),
            source: Cow::Borrowed(include_str!("shaders/cube.wgsl")),
            vertex_entry: Cow::Borrowed(VERTEX_ENTRY),
            fragment_entry: Cow::Borrowed(FRAGMENT_ENTRY),
        }
    }

    /// Checks that both entry points are declared before handing the source
    /// to the device, so a missing function is a typed error rather than a
    /// pipeline validation failure.
    pub fn validate(&self) -> Result<(), RenderError> {
        let code = strip_comments(&self.source);
        for entry in [&self.vertex_entry, &self.fragment_entry] {
            if !declares_fn(&code, entry) {
                return Err(RenderError::MissingEntryPoint {
                    program: self.label.to_string(),
                    entry_point: entry.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ShaderProgram {
    fn default() -> Self {
        Self::cube()
    }
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `source` with `//` line comments and (nestable) `/* */` block comments
/// blanked out. Line structure is kept.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        if depth > 0 {
            match (c, next) {
                ('*', Some('/')) => {
                    chars.next();
                    depth -= 1;
                }
                ('/', Some('*')) => {
                    chars.next();
                    depth += 1;
                }
                ('\n', _) => out.push('\n'),
                _ => {}
            }
            continue;
        }

        match (c, next) {
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                depth = 1;
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Whether `source` contains `fn <name>` as whole tokens.
fn declares_fn(source: &str, name: &str) -> bool {
    source.match_indices("fn").any(|(at, _)| {
        if source[..at].chars().next_back().is_some_and(is_ident) {
            return false;
        }
        let rest = &source[at + 2..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            return false;
        }
        trimmed
            .strip_prefix(name)
            .is_some_and(|tail| !tail.chars().next().is_some_and(is_ident))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_program_declares_entry_points() {
        assert!(ShaderProgram::cube().validate().is_ok());
    }

    #[test]
    fn missing_fragment_entry_is_reported() {
        let program = ShaderProgram {
            source: Cow::Borrowed("@vertex fn vertexMain() -> @builtin(position) vec4<f32> { return vec4<f32>(); }"),
            ..ShaderProgram::cube()
        };
        assert_eq!(
            program.validate(),
            Err(RenderError::MissingEntryPoint {
                program: "cube".to_string(),
                entry_point: FRAGMENT_ENTRY.to_string(),
            })
        );
    }

    #[test]
    fn declares_fn_matches_whole_tokens() {
        assert!(declares_fn("fn vertexMain(", "vertexMain"));
        assert!(declares_fn("@vertex\nfn  vertexMain (", "vertexMain"));
        assert!(!declares_fn("fn vertexMainAlt(", "vertexMain"));
        assert!(!declares_fn("defn vertexMain(", "vertexMain"));
        assert!(!declares_fn("fnvertexMain(", "vertexMain"));
        assert!(!declares_fn("// vertexMain", "vertexMain"));
    }

    #[test]
    fn commented_out_entry_point_is_missing() {
        let program = ShaderProgram {
            source: Cow::Borrowed(
                "@vertex fn vertexMain() -> @builtin(position) vec4<f32> { return vec4<f32>(); }\n\
                 // @fragment fn fragmentMain() -> @location(0) vec4<f32> { return vec4<f32>(); }\n\
                 /* fn fragmentMain( /* nested */ fn fragmentMain( */",
            ),
            ..ShaderProgram::cube()
        };
        assert!(matches!(
            program.validate(),
            Err(RenderError::MissingEntryPoint { ref entry_point, .. }) if entry_point == FRAGMENT_ENTRY
        ));
    }

    #[test]
    fn comments_are_blanked_but_code_is_kept() {
        let code = strip_comments("fn a() {} // fn b(\n/* fn c( */fn d() {}");
        assert!(declares_fn(&code, "a"));
        assert!(!declares_fn(&code, "b"));
        assert!(!declares_fn(&code, "c"));
        assert!(declares_fn(&code, "d"));
        assert_eq!(code.lines().count(), 2);
    }
}
