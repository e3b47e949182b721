use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
}

impl RedirectKind {
    pub fn from_operator(word: &str) -> Option<Self> {
        match word {
            "<" => Some(RedirectKind::In),
            ">" => Some(RedirectKind::Out),
            _ => None,
        }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            RedirectKind::In => "<",
            RedirectKind::Out => ">",
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

/// One external command with its redirections resolved.
///
/// `args[0]` is the program by convention. `args` never holds a redirection
/// operator or its target once built by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
}

impl CommandSpec {
    pub fn new(args: Vec<String>) -> Self {
        CommandSpec {
            program: args.first().cloned().unwrap_or_default(),
            args,
            input: None,
            output: None,
        }
    }

    pub fn with_input(mut self, path: impl Into<String>) -> Self {
        self.input = Some(path.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<String>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// An empty program is never executed.
    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineRequest {
    Single(CommandSpec),
    Piped(CommandSpec, CommandSpec),
}

impl PipelineRequest {
    pub fn commands(&self) -> Vec<&CommandSpec> {
        match self {
            PipelineRequest::Single(cmd) => vec![cmd],
            PipelineRequest::Piped(left, right) => vec![left, right],
        }
    }
}
