//! Heron console entry point

use anyhow::Result;
use clap::Parser;

use heron_console::app::{default_config_path, App, AppConfig};
use heron_console::cli::{
    CandidatesCmd, Cli, Command, EmployeesCmd, JobPostingsCmd, LeaveCmd, OrganizationsCmd,
    PayslipsCmd,
};
use heron_console::guard::{self, Access, Gate};
use heron_console::screens::{
    CandidatesScreen, EmployeesScreen, JobPostingsScreen, LeaveScreen, OrganizationsScreen,
    PayslipsScreen,
};
use heron_console::utils::logger;
use shared::models::{
    CandidateCreate, EmployeeCreate, EmployeeUpdate, JobPostingCreate, OrganizationCreate,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path)?;
    config.apply_cli(&cli);

    logger::init_logger(&config.log_level, config.log_dir.as_deref());
    tracing::debug!(api_url = %config.api_url, "Console starting");

    let mut app = App::init(config).await;
    let mut toasts = app.notifier().subscribe();

    let outcome = run_command(&mut app, cli.command).await;

    // Print queued toasts after the command
    while let Ok(toast) = toasts.try_recv() {
        println!("[{}] {}", toast.level, toast.message);
    }

    outcome
}

async fn run_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let user = app.login(&username, &password).await?;
            let home = app.state().home_route().map(|h| h.path()).unwrap_or("-");
            println!("{} ({}) -> {}", user.username, user.role_name(), home);
            Ok(())
        }
        Command::Logout => {
            app.logout().await;
            Ok(())
        }
        Command::Whoami => {
            match app.state().user() {
                Some(user) => println!(
                    "{} ({})",
                    user.display_name.as_deref().unwrap_or(&user.username),
                    user.role_name()
                ),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Home => {
            match app.state().home_route() {
                Some(home) => println!("{}", home.path()),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Organizations(cmd) => {
            if let Some(notice) = enter(app, Access::Hr)? {
                println!("{notice}");
                return Ok(());
            }
            run_organizations(app, cmd).await
        }
        Command::Employees(cmd) => {
            if let Some(notice) = enter(app, Access::Hr)? {
                println!("{notice}");
                return Ok(());
            }
            run_employees(app, cmd).await
        }
        Command::Candidates(cmd) => {
            if let Some(notice) = enter(app, Access::Hr)? {
                println!("{notice}");
                return Ok(());
            }
            run_candidates(app, cmd).await
        }
        Command::JobPostings(cmd) => {
            if let Some(notice) = enter(app, Access::Hr)? {
                println!("{notice}");
                return Ok(());
            }
            run_job_postings(app, cmd).await
        }
        Command::Leave(cmd) => {
            if let Some(notice) = enter(app, Access::Hr)? {
                println!("{notice}");
                return Ok(());
            }
            run_leave(app, cmd).await
        }
        Command::Payslips(cmd) => {
            if let Some(notice) = enter(app, Access::SignedIn)? {
                println!("{notice}");
                return Ok(());
            }
            run_payslips(app, cmd).await
        }
    }
}

/// Apply the route guard; a notice means the screen does not run.
fn enter(app: &App, access: Access) -> Result<Option<String>> {
    match guard::resolve(app.state(), access) {
        Gate::Allow => Ok(None),
        Gate::Loading => Ok(Some("Session still loading, try again".to_string())),
        Gate::Redirect(home) => Ok(Some(format!(
            "This screen needs an HR role, taking you to {}",
            home.path()
        ))),
        Gate::LoginPrompt => anyhow::bail!("Not signed in. Run `heron login` first"),
    }
}

async fn run_organizations(app: &App, cmd: OrganizationsCmd) -> Result<()> {
    let mut screen = OrganizationsScreen::new(app.client(), app.notifier().clone());
    screen.load().await?;

    match cmd {
        OrganizationsCmd::List { search } => {
            if let Some(search) = search {
                screen.set_search(search);
            }
            for org in screen.visible() {
                println!(
                    "{:>8}  {:<24} {}",
                    org.id,
                    org.name,
                    org.description.as_deref().unwrap_or("-")
                );
            }
        }
        OrganizationsCmd::Create {
            name,
            description,
            parent_id,
        } => {
            let created = screen
                .create(OrganizationCreate {
                    name,
                    description,
                    parent_id,
                })
                .await?;
            println!("{:>8}  {}", created.id, created.name);
        }
        OrganizationsCmd::Rename { id, name } => {
            let updated = screen.rename(id, name).await?;
            println!("{:>8}  {}", updated.id, updated.name);
        }
    }
    Ok(())
}

async fn run_employees(app: &App, cmd: EmployeesCmd) -> Result<()> {
    let mut screen = EmployeesScreen::new(app.client(), app.notifier().clone());
    screen.load().await?;

    match cmd {
        EmployeesCmd::List { search } => {
            if let Some(search) = search {
                screen.set_search(search);
            }
            for employee in screen.visible() {
                println!(
                    "{:>8}  {:<22} {:<28} {:<16} {}",
                    employee.id,
                    employee.name,
                    employee.email,
                    employee.department.as_deref().unwrap_or("-"),
                    employee.status.as_str()
                );
            }
        }
        EmployeesCmd::Create {
            name,
            email,
            department,
            title,
            organization_id,
        } => {
            let created = screen
                .create(EmployeeCreate {
                    name,
                    email,
                    department,
                    title,
                    organization_id,
                })
                .await?;
            println!("{:>8}  {}", created.id, created.name);
        }
        EmployeesCmd::Update {
            id,
            name,
            email,
            department,
            title,
            organization_id,
        } => {
            let updated = screen
                .update(
                    id,
                    EmployeeUpdate {
                        name,
                        email,
                        department,
                        title,
                        organization_id,
                        status: None,
                    },
                )
                .await?;
            println!("{:>8}  {}", updated.id, updated.name);
        }
    }
    Ok(())
}

async fn run_candidates(app: &App, cmd: CandidatesCmd) -> Result<()> {
    let mut screen = CandidatesScreen::new(app.client(), app.notifier().clone());
    screen.load().await?;

    match cmd {
        CandidatesCmd::List { search } => {
            if let Some(search) = search {
                screen.set_search(search);
            }
            for candidate in screen.visible() {
                println!(
                    "{:>8}  {:<22} {:<11} {:<9} {}",
                    candidate.id,
                    candidate.name,
                    candidate.stage.as_str(),
                    if candidate.invited { "invited" } else { "-" },
                    candidate.position
                );
            }
        }
        CandidatesCmd::Add {
            name,
            email,
            position,
        } => {
            let created = screen
                .add(CandidateCreate {
                    name,
                    email,
                    position,
                })
                .await?;
            println!("{:>8}  {}", created.id, created.name);
        }
        CandidatesCmd::Invite { id } => {
            let updated = screen.invite(id).await?;
            println!("{:>8}  {} invited", updated.id, updated.name);
        }
        CandidatesCmd::Advance { id, stage } => {
            let updated = screen.advance(id, stage).await?;
            println!("{:>8}  {} -> {}", updated.id, updated.name, updated.stage.as_str());
        }
    }
    Ok(())
}

async fn run_job_postings(app: &App, cmd: JobPostingsCmd) -> Result<()> {
    let mut screen = JobPostingsScreen::new(app.client(), app.notifier().clone());
    screen.load().await?;

    match cmd {
        JobPostingsCmd::List { search } => {
            if let Some(search) = search {
                screen.set_search(search);
            }
            for posting in screen.visible() {
                println!(
                    "{:>8}  {:<8} {:<28} {}",
                    posting.id,
                    posting.status.as_str(),
                    posting.title,
                    posting.department
                );
            }
        }
        JobPostingsCmd::Post {
            title,
            department,
            location,
            description,
        } => {
            let created = screen
                .post(JobPostingCreate {
                    title,
                    department,
                    location,
                    description,
                })
                .await?;
            println!("{:>8}  {}", created.id, created.title);
        }
        JobPostingsCmd::Open { id } => {
            let updated = screen.open(id).await?;
            println!("{:>8}  {} is {}", updated.id, updated.title, updated.status.as_str());
        }
        JobPostingsCmd::Close { id } => {
            let updated = screen.close(id).await?;
            println!("{:>8}  {} is {}", updated.id, updated.title, updated.status.as_str());
        }
    }
    Ok(())
}

async fn run_leave(app: &App, cmd: LeaveCmd) -> Result<()> {
    let mut screen = LeaveScreen::new(app.client(), app.notifier().clone());
    screen.load().await?;

    match cmd {
        LeaveCmd::List { status } => {
            screen.set_status_filter(status);
            for request in screen.visible() {
                println!(
                    "{:>8}  {:<9} {:<22} {:<9} {} .. {}",
                    request.id,
                    request.status.as_str(),
                    request.employee_name,
                    request.kind.as_str(),
                    request.start_date,
                    request.end_date
                );
            }
        }
        LeaveCmd::Approve { id, note } => {
            let updated = screen.approve(id, note).await?;
            println!("{:>8}  {}", updated.id, updated.status.as_str());
        }
        LeaveCmd::Reject { id, note } => {
            let updated = screen.reject(id, note).await?;
            println!("{:>8}  {}", updated.id, updated.status.as_str());
        }
    }
    Ok(())
}

async fn run_payslips(app: &App, cmd: PayslipsCmd) -> Result<()> {
    let mut screen = PayslipsScreen::new(app.client(), app.notifier().clone());
    screen.load().await?;

    match cmd {
        PayslipsCmd::List {
            period,
            employee_id,
        } => {
            screen.set_period_filter(period);
            screen.set_employee_filter(employee_id);
            for payslip in screen.visible() {
                println!(
                    "{:>8}  {:<22} {:<8} {:>12.2} {}",
                    payslip.id,
                    payslip.employee_name,
                    payslip.period,
                    payslip.net,
                    payslip.currency
                );
            }
            println!("Total net: {:.2}", screen.total_net());
        }
    }
    Ok(())
}
