use crate::adapters::LocalFileSource;
use crate::core::catalog::CatalogLoader;
use crate::core::index::selection_options;
use crate::core::matcher::lookup;
use crate::core::render::{render, RenderOptions};
use crate::domain::model::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PlannerError, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const TITLE: &str = "AI Career Planner for Engineers";
pub const PROMPT: &str = "Select or type your target job role: ";

/// Prefix that makes a line a role name even when it looks like a command or number.
pub const LITERAL_PREFIX: char = '=';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub render: RenderOptions,
    pub show_footer: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            show_footer: true,
        }
    }
}

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    List,
    Reload,
    Nothing,
    Select(usize),
    Query(&'a str),
}

/// Command words and option numbers take precedence over role names; a leading
/// `=` forces the rest of the line to be read as a role name.
fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if let Some(name) = trimmed.strip_prefix(LITERAL_PREFIX) {
        return Input::Query(name);
    }
    match trimmed.to_lowercase().as_str() {
        "" => Input::Nothing,
        "q" | "quit" | "exit" => Input::Quit,
        "list" => Input::List,
        "reload" => Input::Reload,
        _ => match trimmed.parse::<usize>() {
            Ok(0) => Input::Nothing,
            Ok(index) => Input::Select(index),
            Err(_) => Input::Query(line),
        },
    }
}

/// Serves lookups against a loaded, non-empty catalog.
pub struct Session<'a, S: CatalogSource = LocalFileSource> {
    loader: &'a CatalogLoader<S>,
    path: PathBuf,
    catalog: Arc<Catalog>,
    choices: Vec<String>,
    options: SessionOptions,
}

impl<'a, S: CatalogSource> Session<'a, S> {
    /// Loads the catalog at `path`; an empty catalog is unusable and reported as such.
    pub fn open(
        loader: &'a CatalogLoader<S>,
        path: impl Into<PathBuf>,
        options: SessionOptions,
    ) -> Result<Self> {
        let path = path.into();
        let catalog = load_usable(loader, &path)?;
        let choices = selection_options(catalog.roles());
        Ok(Self {
            loader,
            path,
            catalog,
            choices,
            options,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The empty sentinel followed by every role name, computed once per load.
    pub fn selection_options(&self) -> &[String] {
        &self.choices
    }

    /// Renders the roadmap for `query`; `Ok(None)` when nothing was selected.
    pub fn respond(&self, query: &str) -> Result<Option<String>> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        tracing::info!("Generating career roadmap for {}", query.trim());
        let record = lookup(self.catalog.roles(), query)?;
        let mut output = render(record, self.options.render)?;

        if self.options.show_footer {
            if !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&footer(&self.path));
            output.push('\n');
        }
        Ok(Some(output))
    }

    /// Drops the memoized catalog and reads the source again.
    pub fn reload(&mut self) -> Result<()> {
        self.loader.invalidate(&self.path);
        self.catalog = load_usable(self.loader, &self.path)?;
        self.choices = selection_options(self.catalog.roles());
        Ok(())
    }

    /// Interactive loop: shows the options, then answers one line at a time until quit or EOF.
    ///
    /// Lookup misses are reported and the loop continues; load failures end it.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        writeln!(output, "🧠 {}", TITLE)?;
        writeln!(
            output,
            "Enter your desired IT role below, or select from the list, to get a personalized roadmap."
        )?;
        writeln!(
            output,
            "Commands: list, reload, quit. Prefix a role name with '{}' if it reads like a command or number.",
            LITERAL_PREFIX
        )?;
        self.write_options(&mut output)?;

        let mut line = String::new();
        loop {
            write!(output, "🎯 {}", PROMPT)?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            let entry = line.trim_end_matches(&['\n', '\r'][..]);

            let query = match parse_input(entry) {
                Input::Quit => break,
                Input::Nothing => continue,
                Input::List => {
                    self.write_options(&mut output)?;
                    continue;
                }
                Input::Reload => {
                    self.reload()?;
                    writeln!(output, "Reloaded {} roles.", self.catalog.len())?;
                    continue;
                }
                Input::Select(index) => match self.choices.get(index) {
                    Some(name) => name.clone(),
                    None => {
                        let named = self.choices.len() - 1;
                        if named == 0 {
                            writeln!(output, "There is no option {}; type a role name.", index)?;
                        } else {
                            writeln!(
                                output,
                                "There is no option {}; choose 1-{} or type a role name.",
                                index, named
                            )?;
                        }
                        continue;
                    }
                },
                Input::Query(text) => text.to_string(),
            };

            match self.respond(&query) {
                Ok(Some(rendered)) => write!(output, "\n{}\n", rendered)?,
                Ok(None) => {}
                Err(e) if !e.is_fatal() => {
                    tracing::warn!("{}", e);
                    writeln!(output, "{}", e.user_friendly_message())?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    fn write_options<W: Write>(&self, output: &mut W) -> Result<()> {
        for (index, name) in self.choices.iter().enumerate() {
            if name.is_empty() {
                writeln!(output, "  {:>3}. (none)", index)?;
            } else {
                writeln!(output, "  {:>3}. {}", index, name)?;
            }
        }
        Ok(())
    }
}

fn load_usable<S: CatalogSource>(loader: &CatalogLoader<S>, path: &Path) -> Result<Arc<Catalog>> {
    let catalog = loader.load(path)?;
    if catalog.is_empty() {
        return Err(PlannerError::EmptyCatalog {
            path: path.to_path_buf(),
        });
    }
    Ok(catalog)
}

/// Closing note naming the file the roadmap came from.
pub fn footer(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!(
        "Data loaded from `{}`. Ensure the file is up-to-date and correctly formatted.",
        name
    )
}
