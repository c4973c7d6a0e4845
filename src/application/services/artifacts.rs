//! Shell artifact generation
//!
//! Pure renderers over the catalog plus a thin service writing their output.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Catalog, CommandType};
use crate::infrastructure::traits::FileSystem;

pub const GENERATED_HEADER: &str = "# AUTO-GENERATED FILE. DO NOT EDIT DIRECTLY.";

/// Completion script dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionShell {
    Bash,
    Zsh,
}

/// Quote `s` for use inside single quotes.
fn single_quote_escape(s: &str) -> String {
    s.replace('\'', r"'\''")
}

/// Render the alias/function file.
///
/// `source_label` names the files to edit instead of the generated one.
pub fn render_aliases(catalog: &Catalog, source_label: &str) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push('\n');
    out.push_str(&format!("# Edit {source_label} instead.\n\n"));

    for category in catalog.categories() {
        out.push_str(&format!("\n#* {}\n", category.name));
        for command in &category.commands {
            if !command.desc.is_empty() {
                out.push_str(&format!("# {}\n", command.desc));
            }
            match command.kind {
                CommandType::Alias => out.push_str(&format!(
                    "alias {}='{}'\n",
                    command.name,
                    single_quote_escape(&command.cmd)
                )),
                CommandType::Function => {
                    out.push_str(&format!("{}() {{ {}; }}\n", command.name, command.cmd))
                }
            }
        }
    }
    out
}

/// Render a completion script offering every command name as first word.
pub fn render_completion(catalog: &Catalog, program: &str, shell: CompletionShell) -> String {
    let names = catalog.command_names().join(" ");
    let func = format!("_{}_complete", program.replace('-', "_"));

    match shell {
        CompletionShell::Bash => format!(
            r#"{GENERATED_HEADER}
# bash completion for {program} command names
{func}() {{
    local cur="${{COMP_WORDS[COMP_CWORD]}}"
    local i
    for (( i=1; i<COMP_CWORD; i++ )); do
        case "${{COMP_WORDS[i]}}" in
            -*) ;;
            *) COMPREPLY=(); return 0 ;;
        esac
    done
    COMPREPLY=( $(compgen -W "{names}" -- "$cur") )
}}
complete -F {func} {program}
"#
        ),
        CompletionShell::Zsh => format!(
            r#"#compdef {program}
{GENERATED_HEADER}
# zsh completion for {program} command names
{func}() {{
    _arguments -s \
        '(-c --continuous)'{{-c,--continuous}}'[return to the menu after each command]' \
        '1:command:({names})' \
        '*::argument:_default'
}}
compdef {func} {program}
"#
        ),
    }
}

/// Service writing generated artifacts to disk.
pub struct ArtifactService {
    fs: Arc<dyn FileSystem>,
}

impl ArtifactService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn write_aliases(
        &self,
        catalog: &Catalog,
        path: &Path,
        source_label: &str,
    ) -> ApplicationResult<()> {
        debug!("write_aliases: path={}", path.display());
        self.write(path, &render_aliases(catalog, source_label))
    }

    pub fn write_completion(
        &self,
        catalog: &Catalog,
        path: &Path,
        program: &str,
        shell: CompletionShell,
    ) -> ApplicationResult<()> {
        debug!("write_completion: path={}, shell={:?}", path.display(), shell);
        self.write(path, &render_completion(catalog, program, shell))
    }

    fn write(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create output directory for", path)?;
        self.fs
            .write(path, content)
            .with_path_context("write artifact", path)
    }
}
