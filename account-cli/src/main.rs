use account_client::AccountClient;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(about = "Manage accounts on an account server")]
struct Cli {
    #[clap(short, long, env = "ACCOUNT_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new account.
    Create {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        first_name: Option<String>,
        #[clap(long)]
        last_name: Option<String>,
    },
    /// Show an account, given its credentials.
    Get {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Change the names on an account.
    Update {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        first_name: Option<String>,
        #[clap(long)]
        last_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let client = AccountClient::connect(&args.server)?;

    match args.command {
        Command::Create {
            email,
            password,
            first_name,
            last_name,
        } => {
            let account = client
                .create(&email, &password, first_name.as_deref(), last_name.as_deref())
                .await?;
            println!("Account created: {}", account);
        }
        Command::Get { email, password } => {
            let account = client.get(&email, &password).await?;
            println!("{}", account);
        }
        Command::Update {
            email,
            password,
            first_name,
            last_name,
        } => {
            let account = client
                .update(&email, &password, first_name.as_deref(), last_name.as_deref())
                .await?;
            println!("Account updated: {}", account);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_with_optional_names() {
        let cli = Cli::try_parse_from([
            "account-cli",
            "update",
            "--email",
            "a@b.com",
            "--password",
            "p1",
            "--last-name",
            "B",
        ])
        .unwrap();
        assert_eq!(cli.server, "http://127.0.0.1:8080");
        match cli.command {
            Command::Update {
                email,
                first_name,
                last_name,
                ..
            } => {
                assert_eq!(email, "a@b.com");
                assert_eq!(first_name, None);
                assert_eq!(last_name.as_deref(), Some("B"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_requires_password() {
        assert!(Cli::try_parse_from(["account-cli", "create", "--email", "a@b.com"]).is_err());
    }
}
