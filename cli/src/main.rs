use clap::Parser;
use miette::{Diagnostic, Result};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    ExampleHighlighter, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use stackc::{
    CompiledProgram, Engine, EngineOptions, EvaluatorOptions, ParserOptions,
    UndefinedVariablePolicy, Variables, lexer, parser::DEFAULT_MAX_DEPTH, render_error,
};
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

/// stackc - compile and run small programs on a stack machine
#[derive(Parser, Debug)]
#[command(name = "stackc")]
#[command(about = "Compile and run stackc programs", long_about = None)]
struct Args {
    /// Read the program from a file
    #[arg(long, value_name = "PATH", conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the parsed statements
    #[arg(long)]
    ast: bool,

    /// Print the bytecode listing
    #[arg(long)]
    bytecode: bool,

    /// Write the AST as a Graphviz DOT file
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Walk the AST instead of running the bytecode
    #[arg(long)]
    eval: bool,

    /// Treat undefined variables as zero (only with --eval)
    #[arg(long, requires = "eval")]
    lenient: bool,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Program text (if not provided, reads from --file or stdin)
    source: Option<String>,
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("could not read {}", path.display())]
    #[diagnostic(code(stackc::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {}", path.display())]
    #[diagnostic(code(stackc::io))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read input")]
    #[diagnostic(code(stackc::io))]
    Stdin(#[source] std::io::Error),
    #[error("program failed")]
    Failed,
}

fn print_variables(variables: &Variables) {
    for (name, value) in variables {
        println!("{} = {}", name, value);
    }
}

fn dump_tokens(input: &str) {
    // Lexical errors are reported by the compile step.
    if let Ok(tokens) = lexer::tokenize(input) {
        println!("=== Tokens ===");
        for token in &tokens {
            println!("{}", token);
        }
        println!();
    }
}

fn dump_program(program: &CompiledProgram, args: &Args) -> Result<(), CliError> {
    if args.ast {
        println!("=== AST ===");
        for statement in program.statements() {
            println!("{}", statement);
        }
        println!();
    }

    if args.bytecode {
        println!("=== Bytecode ===");
        print!("{}", program.code());
        println!();
    }

    if let Some(path) = &args.dot {
        std::fs::write(path, program.to_dot()).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote DOT file");
    }

    Ok(())
}

const KEYWORDS: [&str; 4] = ["if", "else", "true", "false"];

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn keyword_completer() -> DefaultCompleter {
    let mut completions = DefaultCompleter::with_inclusions(&['_']);
    completions.insert(KEYWORDS.iter().map(|k| k.to_string()).collect());
    completions
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let keywords: Vec<String> = KEYWORDS.iter().map(|k| k.to_string()).collect();
    let completer = Box::new(keyword_completer());

    let completion_menu = Box::new(
        IdeMenu::default()
            .with_name("completion_menu")
            .with_min_completion_width(0)
            .with_max_completion_width(50)
            .with_padding(0)
            .with_description_mode(DescriptionMode::PreferRight),
    );

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(ExampleHighlighter::new(keywords)))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("stackc".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Compile and run one program. Returns `Ok(false)` when the program failed
/// and its error has been rendered.
fn interpret_input(engine: &Engine, input: &str, args: &Args) -> Result<bool, CliError> {
    if args.tokens {
        dump_tokens(input);
    }

    let program = match engine.compile(input) {
        Ok(program) => program,
        Err(e) => {
            render_error(&e);
            return Ok(false);
        }
    };

    dump_program(&program, args)?;

    let result = if args.eval {
        let undefined_variables = if args.lenient {
            UndefinedVariablePolicy::DefaultToZero
        } else {
            UndefinedVariablePolicy::Error
        };
        program.evaluate(EvaluatorOptions {
            undefined_variables,
            ..EvaluatorOptions::default()
        })
    } else {
        program.run()
    };

    match result {
        Ok(variables) => {
            print_variables(&variables);
            Ok(true)
        }
        Err(e) => {
            render_error(&e);
            Ok(false)
        }
    }
}

fn read_file(path: &PathBuf) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })
}

fn run(args: &Args) -> Result<bool, CliError> {
    let engine = Engine::new(EngineOptions {
        parser: ParserOptions {
            max_depth: args.max_depth,
        },
    });

    if let Some(source) = &args.source {
        return interpret_input(&engine, source, args);
    }

    if let Some(path) = &args.file {
        let source = read_file(path)?;
        return interpret_input(&engine, &source, args);
    }

    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        let (mut line_editor, prompt) = setup_reedline();

        println!("stackc REPL - one program per line (Ctrl+D or Ctrl+C to exit)");

        loop {
            match line_editor.read_line(&prompt).map_err(CliError::Stdin)? {
                Signal::Success(buffer) => {
                    if buffer.trim().is_empty() {
                        continue;
                    }
                    interpret_input(&engine, &buffer, args)?;
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(true);
                }
            }
        }
    } else {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(CliError::Stdin)?;
        interpret_input(&engine, &source, args)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // STACKC_LOG takes precedence over RUST_LOG; default to WARN.
    let filter = EnvFilter::try_from_env("STACKC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if run(&args)? {
        Ok(())
    } else {
        Err(CliError::Failed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::Completer;

    #[test]
    fn test_keywords_complete() {
        let mut completer = keyword_completer();
        let values: Vec<_> = completer
            .complete("x = tr", 6)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["true".to_string()]);
    }

    #[test]
    fn test_lenient_requires_eval() {
        assert!(Args::try_parse_from(["stackc", "--lenient", "x = y;"]).is_err());
        let args = Args::try_parse_from(["stackc", "--eval", "--lenient", "x = y;"]).unwrap();
        assert!(args.eval && args.lenient);
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
    }
}
