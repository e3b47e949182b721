use crate::ast::{CommandSpec, RedirectKind};
use crate::error::SyntaxError;

/// Pull `<` / `>` and their targets out of a word list.
///
/// Single left-to-right pass. When an operator repeats, the last target
/// wins; every operator and its target is removed either way. The remaining
/// words keep their order.
pub fn extract_redirections(words: Vec<String>) -> Result<CommandSpec, SyntaxError> {
    let mut args = Vec::with_capacity(words.len());
    let mut input = None;
    let mut output = None;

    let mut words = words.into_iter();
    while let Some(word) = words.next() {
        let Some(kind) = RedirectKind::from_operator(&word) else {
            args.push(word);
            continue;
        };
        let target = match words.next() {
            None => return Err(SyntaxError::MissingRedirectTarget(kind)),
            Some(found) if RedirectKind::from_operator(&found).is_some() => {
                return Err(SyntaxError::UnexpectedOperator { operator: kind, found });
            }
            Some(target) => target,
        };
        match kind {
            RedirectKind::In => input = Some(target),
            RedirectKind::Out => output = Some(target),
        }
    }

    let mut spec = CommandSpec::new(args);
    spec.input = input;
    spec.output = output;
    Ok(spec)
}
