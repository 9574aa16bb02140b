use std::ops::Range;

use super::lexer::Token;

/// A stage as found in the token stream, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStage {
    pub name: String,
    pub commands: Vec<String>,
}

#[derive(Debug)]
struct StageDecl {
    name: String,
    /// Token range from the `stage` keyword to the end of its body.
    span: Range<usize>,
    /// Tokens between the body's braces.
    body: Range<usize>,
}

/// Extracts every `stage('name')` declaration in textual order together with
/// the `sh` commands that belong to it.
///
/// A stage owns the shell steps inside the `{ ... }` block right after its
/// declaration, minus those inside nested stages. Without a block the stage
/// has no commands; an unclosed block runs to the end of the input.
pub fn extract_stages(tokens: &[Token]) -> Vec<RawStage> {
    let decls = find_declarations(tokens);

    decls
        .iter()
        .map(|decl| {
            let nested: Vec<&Range<usize>> = decls
                .iter()
                .filter(|other| decl.body.contains(&other.span.start))
                .map(|other| &other.span)
                .collect();

            let commands = decl
                .body
                .clone()
                .filter(|idx| !nested.iter().any(|span| span.contains(idx)))
                .filter_map(|idx| match_shell_step(tokens, idx))
                .collect();

            RawStage {
                name: decl.name.clone(),
                commands,
            }
        })
        .collect()
}

fn find_declarations(tokens: &[Token]) -> Vec<StageDecl> {
    (0..tokens.len())
        .filter_map(|start| {
            let (name, after) = match_stage_header(tokens, start)?;

            let (body, span_end) = if tokens.get(after) == Some(&Token::LBrace) {
                let close = matching_brace(tokens, after);
                ((after + 1)..close, (close + 1).min(tokens.len()))
            } else {
                (after..after, after)
            };

            Some(StageDecl {
                name,
                span: start..span_end,
                body,
            })
        })
        .collect()
}

/// Matches `stage ( 'name' )`, returning the name and the index after `)`.
fn match_stage_header(tokens: &[Token], start: usize) -> Option<(String, usize)> {
    if !tokens.get(start)?.is_word_ignore_case("stage") {
        return None;
    }

    match tokens.get(start + 1..start + 4)? {
        [Token::LParen, Token::Str(name), Token::RParen] if !name.is_empty() => {
            Some((name.clone(), start + 4))
        }
        _ => None,
    }
}

/// Index of the `}` closing the `{` at `open`, or `tokens.len()` when unbalanced.
fn matching_brace(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;

    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LBrace => depth += 1,
            Token::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return idx;
                }
            }
            _ => {}
        }
    }

    tokens.len()
}

/// Matches `sh 'cmd'`, `sh('cmd')`, `sh script: 'cmd'` and `sh(script: 'cmd', ...)`.
fn match_shell_step(tokens: &[Token], idx: usize) -> Option<String> {
    if !tokens.get(idx)?.is_word("sh") {
        return None;
    }

    let mut next = idx + 1;
    if tokens.get(next) == Some(&Token::LParen) {
        next += 1;
    }
    if tokens.get(next).is_some_and(|t| t.is_word("script"))
        && tokens.get(next + 1) == Some(&Token::Colon)
    {
        next += 2;
    }

    match tokens.get(next)? {
        Token::Str(command) => Some(command.clone()),
        _ => None,
    }
}
