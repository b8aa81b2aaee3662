use gorest_reports::{
    reports,
    users::{CreateUser, UpdateUser},
    Client, Error,
};
use std::{path::PathBuf, process, time::Duration};
use structopt::StructOpt;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(about = "Collect GoREST users and write CSV reports")]
struct Opt {
    /// Base URL of the API [default: https://gorest.co.in/public/v2/]
    #[structopt(long, env = "GOREST_URL")]
    url: Option<String>,
    /// Bearer token, required for create, update and delete
    #[structopt(long, env = "GOREST_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Per-request timeout in seconds
    #[structopt(long, default_value = "10")]
    timeout_secs: u64,
    /// Give up on collecting after this many pages
    #[structopt(long, default_value = "10000")]
    max_pages: u32,
    /// Records per page to ask the server for
    #[structopt(long)]
    per_page: Option<u32>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Fetch all users and write both reports.
    Report {
        /// Directory the CSV files are written to
        #[structopt(long, short, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Create a user.
    Create {
        #[structopt(long)]
        name: String,
        #[structopt(long)]
        email: String,
        #[structopt(long)]
        gender: String,
        #[structopt(long, default_value = "active")]
        status: String,
    },
    /// Update fields of a user.
    Update {
        id: i64,
        #[structopt(long)]
        name: Option<String>,
        #[structopt(long)]
        email: Option<String>,
        #[structopt(long)]
        gender: Option<String>,
        #[structopt(long)]
        status: Option<String>,
    },
    /// Delete a user.
    Delete { id: i64 },
}

/// Process exit code for each kind of failure. Transport and decoding
/// errors count against the command that ran into them.
fn exit_code(err: &Error, report: bool) -> i32 {
    match err {
        Error::Fetch { .. } | Error::PageLimitExceeded(_) => 2,
        Error::Http(_) | Error::Deserialize(_) if report => 2,
        Error::Write { .. } => 3,
        Error::Api(_) | Error::Http(_) | Error::Deserialize(_) => 4,
        _ => 1,
    }
}

async fn run(opt: Opt) -> Result<(), Error> {
    let mut builder = Client::builder()
        .no_env()
        .with_timeout(Duration::from_secs(opt.timeout_secs))
        .with_max_pages(opt.max_pages);
    if let Some(url) = opt.url {
        builder = builder.with_url(url);
    }
    if let Some(token) = opt.token {
        builder = builder.with_token(token);
    }
    if let Some(per_page) = opt.per_page {
        builder = builder.with_per_page(per_page);
    }
    let client = builder.build()?;

    match opt.cmd {
        Command::Report { out_dir } => {
            let summary = reports::generate(&client, &out_dir).await?;
            println!(
                "Collected {} users, wrote {} ({} rows) and {} ({} rows)",
                summary.users,
                summary.active_test_users_path.display(),
                summary.active_test_users,
                summary.domain_counts_path.display(),
                summary.domains,
            );
        }
        Command::Create {
            name,
            email,
            gender,
            status,
        } => {
            let user = client
                .users
                .create(&CreateUser {
                    name,
                    email,
                    gender,
                    status,
                })
                .await?;
            println!("{:?}", user);
        }
        Command::Update {
            id,
            name,
            email,
            gender,
            status,
        } => {
            let user = client
                .users
                .update(
                    id,
                    &UpdateUser {
                        name,
                        email,
                        gender,
                        status,
                    },
                )
                .await?;
            println!("{:?}", user);
        }
        Command::Delete { id } => {
            if client.users.delete(id).await? {
                println!("Deleted user {id}");
            } else {
                println!("Server accepted deleting user {id} without confirming it");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();
    let report = matches!(opt.cmd, Command::Report { .. });
    if let Err(err) = run(opt).await {
        error!(error = %err, "run failed");
        process::exit(exit_code(&err, report));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gorest_reports::ApiError;

    async fn decode_error() -> reqwest::Error {
        reqwest::Response::from(http::Response::new("not json"))
            .json::<serde_json::Value>()
            .await
            .unwrap_err()
    }

    fn api_error(status: u16) -> ApiError {
        ApiError {
            status,
            method: http::Method::DELETE,
            path: "/users/1".to_string(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_exit_codes() {
        let fetch = Error::Fetch {
            page: 2,
            source: api_error(500),
        };
        assert_eq!(exit_code(&fetch, true), 2);
        assert_eq!(exit_code(&Error::PageLimitExceeded(10), true), 2);
        assert_eq!(exit_code(&Error::Deserialize(decode_error().await), true), 2);

        let write = Error::Write {
            path: "out.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        };
        assert_eq!(exit_code(&write, true), 3);

        assert_eq!(exit_code(&Error::Api(api_error(404)), false), 4);
        assert_eq!(exit_code(&Error::InvalidMaxPages, true), 1);
        assert_eq!(exit_code(&Error::InvalidToken, false), 1);
    }

    #[tokio::test]
    async fn test_crud_transport_errors_exit_as_api_errors() {
        assert_eq!(exit_code(&Error::Deserialize(decode_error().await), false), 4);
        assert_eq!(exit_code(&Error::Http(decode_error().await), false), 4);
        assert_eq!(exit_code(&Error::Http(decode_error().await), true), 2);
    }
}
