pub mod redirect;

use crate::ast::{CommandSpec, PipelineRequest};
use crate::error::SyntaxError;
use crate::tokenizer::{tokenize, Token};

pub use redirect::extract_redirections;

pub const PIPE: char = '|';

/// Turn one input line into a single command or a two-stage pipeline.
///
/// Only the first `|` splits the line. Anything after a second `|` stays as
/// literal words of the right-hand command; pipelines are two stages at most.
pub fn build(line: &str) -> Result<PipelineRequest, SyntaxError> {
    match line.split_once(PIPE) {
        None => Ok(PipelineRequest::Single(build_command(line)?)),
        Some((left, right)) => {
            let left = build_command(left)?;
            let right = build_command(right)?;
            Ok(PipelineRequest::Piped(left, right))
        }
    }
}

fn build_command(src: &str) -> Result<CommandSpec, SyntaxError> {
    let words = tokenize(src).into_iter().map(Token::into_string).collect();
    extract_redirections(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RedirectKind;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_command() {
        let req = build("ls -la /tmp").unwrap();
        assert_eq!(
            req,
            PipelineRequest::Single(CommandSpec::new(words(&["ls", "-la", "/tmp"]))),
        );
    }

    #[test]
    fn test_output_redirect() {
        let req = build("echo hi > out.txt").unwrap();
        let PipelineRequest::Single(cmd) = req else {
            panic!("expected a single command");
        };
        assert_eq!(cmd.program, "echo");
        assert_eq!(cmd.args, words(&["echo", "hi"]));
        assert_eq!(cmd.output.as_deref(), Some("out.txt"));
        assert_eq!(cmd.input, None);
    }

    #[test]
    fn test_input_redirect() {
        let req = build("sort < in.txt").unwrap();
        assert_eq!(
            req,
            PipelineRequest::Single(CommandSpec::new(words(&["sort"])).with_input("in.txt")),
        );
    }

    #[test]
    fn test_pipeline() {
        let req = build("ls | wc -l").unwrap();
        assert_eq!(
            req,
            PipelineRequest::Piped(
                CommandSpec::new(words(&["ls"])),
                CommandSpec::new(words(&["wc", "-l"])),
            ),
        );
    }

    #[test]
    fn test_pipeline_without_spaces() {
        let req = build("ls|wc").unwrap();
        assert_eq!(
            req,
            PipelineRequest::Piped(
                CommandSpec::new(words(&["ls"])),
                CommandSpec::new(words(&["wc"])),
            ),
        );
    }

    #[test]
    fn test_pipeline_with_redirects_on_both_sides() {
        let req = build("sort < in.txt | uniq -c > out.txt").unwrap();
        assert_eq!(
            req,
            PipelineRequest::Piped(
                CommandSpec::new(words(&["sort"])).with_input("in.txt"),
                CommandSpec::new(words(&["uniq", "-c"])).with_output("out.txt"),
            ),
        );
    }

    #[test]
    fn test_only_first_pipe_splits() {
        let req = build("a | b | c").unwrap();
        assert_eq!(
            req,
            PipelineRequest::Piped(
                CommandSpec::new(words(&["a"])),
                CommandSpec::new(words(&["b", "|", "c"])),
            ),
        );
    }

    #[test]
    fn test_empty_sides_of_pipe() {
        let PipelineRequest::Piped(left, right) = build("| wc").unwrap() else {
            panic!("expected a pipeline");
        };
        assert!(left.is_empty());
        assert_eq!(right.program, "wc");

        let PipelineRequest::Piped(left, right) = build("ls |").unwrap() else {
            panic!("expected a pipeline");
        };
        assert_eq!(left.program, "ls");
        assert!(right.is_empty());

        let PipelineRequest::Piped(left, right) = build("|").unwrap() else {
            panic!("expected a pipeline");
        };
        assert!(left.is_empty() && right.is_empty());
    }

    #[test]
    fn test_empty_line_is_empty_single() {
        let PipelineRequest::Single(cmd) = build("   \n").unwrap() else {
            panic!("expected a single command");
        };
        assert!(cmd.is_empty());
    }

    #[test]
    fn test_trailing_operator_is_syntax_error() {
        assert_eq!(
            build("ls >"),
            Err(SyntaxError::MissingRedirectTarget(RedirectKind::Out)),
        );
        assert_eq!(
            build("sort <"),
            Err(SyntaxError::MissingRedirectTarget(RedirectKind::In)),
        );
    }

    #[test]
    fn test_syntax_error_on_either_side_aborts_pipeline() {
        assert!(build("ls > | wc").is_err());
        assert!(build("ls | wc >").is_err());
    }

    #[test]
    fn test_build_is_idempotent() {
        let line = "cat < a.txt | grep x > b.txt";
        assert_eq!(build(line), build(line));
    }
}
