use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use income_core::db::{DbConfig, RepositoryRegistry};
use income_core::{
    IncomeStatementEditor, IncomeStatementForm, IncomeStatementId, IncomeStatementRepository,
    PersonType, from_body,
};
use income_data::FormLoader;
use income_db_sqlite::SqliteRepositoryFactory;
use tracing_subscriber::EnvFilter;

/// Validate and store income statement forms.
///
/// Forms are JSON files using the form's camelCase field names; any field
/// left out counts as not filled in.
#[derive(Parser, Debug)]
#[command(name = "income-statement")]
#[command(version, about, long_about = None)]
struct Args {
    /// Storage backend
    #[arg(long, default_value = "sqlite", global = true)]
    backend: String,

    /// Database connection string (e.g., sqlite:income.db?mode=rwc to create if missing)
    #[arg(long, default_value = "sqlite:income.db?mode=rwc", global = true)]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the request body a form would produce
    Validate {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "adult", value_parser = parse_person_type)]
        person_type: PersonType,

        /// Apply the relaxed draft rules
        #[arg(long, default_value_t = false)]
        draft: bool,
    },
    /// Validate a form and store it, updating the statement given by --id
    Save {
        #[arg(short, long)]
        file: PathBuf,

        /// Defaults to adult for a new statement; with --id it must match
        /// the stored statement
        #[arg(short, long, value_parser = parse_person_type)]
        person_type: Option<PersonType>,

        #[arg(long, default_value_t = false)]
        draft: bool,

        #[arg(long, value_parser = parse_id)]
        id: Option<IncomeStatementId>,
    },
    /// Store every form of a JSON array as a new statement
    Import {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "adult", value_parser = parse_person_type)]
        person_type: PersonType,

        #[arg(long, default_value_t = false)]
        draft: bool,
    },
    /// List stored statements, newest first
    List,
    /// Print a stored statement as JSON
    Show {
        #[arg(long, value_parser = parse_id)]
        id: IncomeStatementId,
    },
    /// Delete a statement that has not been handled yet
    Delete {
        #[arg(long, value_parser = parse_id)]
        id: IncomeStatementId,
    },
}

fn parse_person_type(s: &str) -> Result<PersonType, String> {
    PersonType::parse(s).ok_or_else(|| format!("expected 'adult' or 'child', got '{}'", s))
}

fn parse_id(s: &str) -> Result<IncomeStatementId, String> {
    IncomeStatementId::parse(s).ok_or_else(|| format!("'{}' is not a valid statement id", s))
}

fn check_person_type(requested: Option<PersonType>, stored: PersonType) -> Result<()> {
    match requested {
        Some(requested) if requested != stored => bail!(
            "--person-type {} does not match the stored statement's person type {}",
            requested.as_str(),
            stored.as_str()
        ),
        _ => Ok(()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn read_form(path: &Path) -> Result<IncomeStatementForm> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    FormLoader::parse(file).with_context(|| format!("Failed to parse form: {}", path.display()))
}

async fn open_repository(args: &Args) -> Result<Box<dyn IncomeStatementRepository>> {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));

    let config = DbConfig {
        backend: args.backend.clone(),
        connection_string: args.db.clone(),
    };
    registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to open {} database: {}", config.backend, config.connection_string))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match &args.command {
        Command::Validate {
            file,
            person_type,
            draft,
        } => {
            let form = read_form(file)?;
            match from_body(*person_type, &form, *draft) {
                Ok(body) => println!("{}", serde_json::to_string_pretty(&body)?),
                Err(reason) => bail!("Form rejected: {}", reason),
            }
        }
        Command::Save {
            file,
            person_type,
            draft,
            id,
        } => {
            let form = read_form(file)?;
            let repo = open_repository(&args).await?;

            let mut editor = IncomeStatementEditor::load(
                repo.as_ref(),
                person_type.unwrap_or(PersonType::Adult),
                *id,
            )
            .await
            .context("Failed to load income statement")?;
            check_person_type(*person_type, editor.person_type)?;
            editor.update(|current| *current = form);
            if editor.start_date_taken() {
                tracing::warn!("another statement already starts on the same date");
            }

            let saved = editor
                .save(repo.as_ref(), *draft)
                .await
                .context("Failed to save income statement")?;
            println!("{} {}", saved.id, saved.status.as_str());
        }
        Command::Import {
            file,
            person_type,
            draft,
        } => {
            let reader =
                File::open(file).with_context(|| format!("Failed to open: {}", file.display()))?;
            let forms = FormLoader::parse_many(reader)
                .with_context(|| format!("Failed to parse forms: {}", file.display()))?;
            println!("Parsed {} forms", forms.len());

            let repo = open_repository(&args).await?;
            let created = FormLoader::load(repo.as_ref(), *person_type, &forms, *draft)
                .await
                .context("Failed to import forms")?;
            println!("Successfully stored {} income statements.", created.len());
        }
        Command::List => {
            let repo = open_repository(&args).await?;
            for statement in repo.list_income_statements().await? {
                let end = statement
                    .body
                    .end_date()
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                println!(
                    "{}  {:<8}  {:<12}  {:<5}  {} - {}",
                    statement.id,
                    statement.status.as_str(),
                    statement.body.statement_type().as_str(),
                    statement.person_type.as_str(),
                    statement.body.start_date(),
                    end
                );
            }
        }
        Command::Show { id } => {
            let repo = open_repository(&args).await?;
            let statement = repo
                .get_income_statement(*id)
                .await
                .with_context(|| format!("Failed to fetch income statement {}", id))?;
            println!("{}", serde_json::to_string_pretty(&statement)?);
        }
        Command::Delete { id } => {
            let repo = open_repository(&args).await?;
            repo.delete_income_statement(*id)
                .await
                .with_context(|| format!("Failed to delete income statement {}", id))?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_type_may_be_omitted() {
        assert!(check_person_type(None, PersonType::Child).is_ok());
    }

    #[test]
    fn matching_person_type_is_accepted() {
        assert!(check_person_type(Some(PersonType::Child), PersonType::Child).is_ok());
    }

    #[test]
    fn conflicting_person_type_is_refused() {
        let err = check_person_type(Some(PersonType::Adult), PersonType::Child).unwrap_err();

        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn save_person_type_has_no_default() {
        let args = Args::try_parse_from(["income-statement", "save", "--file", "form.json"])
            .expect("save args should parse");

        let Command::Save { person_type, .. } = args.command else {
            panic!("expected the save command");
        };
        assert_eq!(person_type, None);
    }
}
