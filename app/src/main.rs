use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use category_app::screens::{main_menu, sign_in, sign_up};
use category_app::{Config, FileSessionStore, MainMenu, Notice, Route, UreqTransport};
use category_core::{
    CategoryClient, CategoryForm, CategoryId, CategoryStatus, SessionContext, SignInForm,
    SignUpForm,
};

#[derive(Parser, Debug)]
#[command(name = "category-app", about = "Sign in and manage categories")]
struct Cli {
    #[command(flatten)]
    config: Config,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token.
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    SignUp {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the profile and category list.
    Menu,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "deactive")]
        status: CategoryStatus,
    },
    Edit {
        id: CategoryId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        status: CategoryStatus,
    },
    Delete {
        id: CategoryId,
    },
    /// Forget the stored session.
    Logout,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CategoryClient::new(&cli.config.base_url);
    let transport = UreqTransport::new();
    let mut session = SessionContext::new(FileSessionStore::new(&cli.config.session_file));

    let failed = match cli.command {
        Command::SignIn { email, password } => {
            let outcome = sign_in::submit(
                &client,
                &transport,
                &mut session,
                &SignInForm { email, password },
            );
            announce(&outcome.notice, outcome.route)
        }
        Command::SignUp {
            first_name,
            last_name,
            email,
            password,
        } => {
            let form = SignUpForm {
                first_name,
                last_name,
                email,
                password,
            };
            let outcome = sign_up::submit(&client, &transport, &form);
            announce(&outcome.notice, outcome.route)
        }
        Command::Menu => with_menu(&client, &transport, &session, |_| None),
        Command::Add { name, status } => with_menu(&client, &transport, &session, |menu| {
            Some(menu.add_category(&CategoryForm { name, status }))
        }),
        Command::Edit { id, name, status } => with_menu(&client, &transport, &session, |menu| {
            Some(menu.update_category(id, &CategoryForm { name, status }))
        }),
        Command::Delete { id } => with_menu(&client, &transport, &session, |menu| {
            Some(menu.delete_category(&id))
        }),
        Command::Logout => {
            let route = main_menu::logout(&mut session).with_context(|| {
                format!(
                    "failed to clear session file {}",
                    session.store().path().display()
                )
            })?;
            announce(&Notice::logged_out(), route)
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Print a notice and where to go next. Returns whether it was a failure.
fn announce(notice: &Notice, route: Route) -> bool {
    println!("{notice}");
    println!("Next: {route} (`category-app {}`)", route.command());
    notice.is_error()
}

/// Open and load the main menu, run `action`, then print the screen.
fn with_menu<F>(
    client: &CategoryClient,
    transport: &UreqTransport,
    session: &SessionContext<FileSessionStore>,
    action: F,
) -> bool
where
    F: FnOnce(&mut MainMenu<'_, UreqTransport>) -> Option<Notice>,
{
    let mut menu = match MainMenu::open(client, transport, session) {
        Ok(menu) => menu,
        Err(route) => return announce(&Notice::not_signed_in(), route),
    };
    menu.load();
    let notice = action(&mut menu);
    if let Some(notice) = &notice {
        println!("{notice}");
        println!();
    }
    println!("{menu}");
    notice.is_some_and(|n| n.is_error()) || menu.categories().error
}
