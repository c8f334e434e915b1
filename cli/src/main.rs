//! GradTrack CLI - non-interactive subcommand surface over the workflow
//! engine.
//!
//! Each invocation opens the flat-file store, authenticates where the
//! operation requires it, performs exactly one workflow operation, prints
//! the result, and exits. There is no menu loop and no session state beyond
//! the data directory.

mod seed;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gradtrack_engine::Workflow;
use gradtrack_store::JsonStore;
use gradtrack_types::{
    Decision, DefenseDecision, DefenseRequest, Principal, SearchField, StudentStatus,
};

#[derive(Parser)]
#[command(name = "gradtrack", version, about = "Academic thesis workflow manager")]
struct Cli {
    /// Data directory holding the JSON collections.
    #[arg(long, global = true, env = "GRADTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Auth {
    /// Account id.
    #[arg(long)]
    user: String,
    /// Account password.
    #[arg(long)]
    password: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Verdict {
    Approve,
    Reject,
}

#[derive(Subcommand)]
enum Command {
    /// Seed sample users and courses (overwrites existing data).
    Seed,
    /// Verify credentials and show the account role.
    Login(Auth),
    /// List courses with open seats.
    Courses,
    /// Submit a thesis proposal against a course (student).
    Submit {
        #[command(flatten)]
        auth: Auth,
        course_id: String,
    },
    /// Show your proposal or defense status (student).
    Status(Auth),
    /// Request a thesis defense (student).
    RequestDefense {
        #[command(flatten)]
        auth: Auth,
        #[arg(long)]
        title: String,
        #[arg(long = "abstract")]
        abstract_text: String,
        /// Comma-separated keywords.
        #[arg(long)]
        keywords: String,
        #[arg(long)]
        pdf: String,
        #[arg(long)]
        cover: String,
    },
    /// List pending proposals on your courses (professor).
    Proposals(Auth),
    /// Approve or reject a proposal (professor).
    Decide {
        #[command(flatten)]
        auth: Auth,
        proposal_id: String,
        #[arg(value_enum)]
        verdict: Verdict,
    },
    /// List pending defense requests on your courses (professor).
    Defenses(Auth),
    /// Approve or reject a defense request (professor).
    DecideDefense {
        #[command(flatten)]
        auth: Auth,
        thesis_id: String,
        #[arg(value_enum)]
        verdict: Verdict,
        /// Defense date (YYYY-MM-DD); required when approving.
        #[arg(long)]
        date: Option<String>,
        /// Reviewer id; pass exactly twice when approving.
        #[arg(long = "reviewer")]
        reviewers: Vec<String>,
    },
    /// List theses assigned to you for review (professor).
    Review(Auth),
    /// Submit a grade for a thesis (professor).
    Grade {
        #[command(flatten)]
        auth: Auth,
        thesis_id: String,
        /// Score in [0, 20].
        grade: f64,
    },
    /// Show your supervision and review record (professor).
    Report(Auth),
    /// Search the archive of completed theses.
    Search {
        /// title, keyword, author, supervisor, reviewer, or year.
        #[arg(long, default_value = "title")]
        field: String,
        query: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::home_dir()
            .context("cannot determine home directory; pass --data-dir")?
            .join(".gradtrack")
            .join("data"),
    };
    let store = JsonStore::open(&data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;

    if let Command::Seed = cli.command {
        return seed::run(&store);
    }

    let workflow = Workflow::new(store);
    run(&workflow, cli.command)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn login(workflow: &Workflow<JsonStore>, auth: &Auth) -> Result<Principal> {
    Ok(workflow.authenticate(&auth.user, &auth.password)?)
}

fn run(workflow: &Workflow<JsonStore>, command: Command) -> Result<()> {
    match command {
        Command::Seed => unreachable!("seed is handled before the engine is built"),

        Command::Login(auth) => {
            let principal = login(workflow, &auth)?;
            println!("Welcome, {} ({}).", principal.name, principal.role);
        }

        Command::Courses => {
            let available = workflow.available_courses();
            if available.is_empty() {
                println!("No courses with open seats.");
            }
            for entry in available {
                println!(
                    "{:<8} {:<40} {:<20} {} seats",
                    entry.course.id, entry.course.title, entry.supervisor_name, entry.remaining
                );
            }
        }

        Command::Submit { auth, course_id } => {
            let principal = login(workflow, &auth)?;
            let proposal = workflow.student(&principal)?.submit_proposal(&course_id)?;
            println!(
                "Proposal {} submitted and sent to the supervisor.",
                proposal.proposal_id
            );
        }

        Command::Status(auth) => {
            let principal = login(workflow, &auth)?;
            print_status(&workflow.student(&principal)?.status());
        }

        Command::RequestDefense {
            auth,
            title,
            abstract_text,
            keywords,
            pdf,
            cover,
        } => {
            let principal = login(workflow, &auth)?;
            let thesis = workflow.student(&principal)?.request_defense(DefenseRequest {
                title,
                abstract_text,
                keywords,
                pdf_path: pdf,
                cover_image_path: cover,
            })?;
            println!("Defense request {} submitted.", thesis.thesis_id);
        }

        Command::Proposals(auth) => {
            let principal = login(workflow, &auth)?;
            let pending = workflow.professor(&principal)?.pending_proposals();
            if pending.is_empty() {
                println!("No pending proposals.");
            }
            for entry in pending {
                println!(
                    "{:<10} {:<24} {}",
                    entry.proposal.proposal_id, entry.student.name, entry.course.title
                );
            }
        }

        Command::Decide {
            auth,
            proposal_id,
            verdict,
        } => {
            let principal = login(workflow, &auth)?;
            let decision = match verdict {
                Verdict::Approve => Decision::Approved,
                Verdict::Reject => Decision::Rejected,
            };
            workflow
                .professor(&principal)?
                .decide_proposal(&proposal_id, decision)?;
            println!("Proposal {} {}.", proposal_id, decision.as_str());
        }

        Command::Defenses(auth) => {
            let principal = login(workflow, &auth)?;
            let pending = workflow.professor(&principal)?.pending_defense_requests();
            if pending.is_empty() {
                println!("No pending defense requests.");
            }
            for entry in pending {
                println!(
                    "{:<10} {:<24} {}",
                    entry.thesis.thesis_id, entry.student.name, entry.thesis.title
                );
            }
        }

        Command::DecideDefense {
            auth,
            thesis_id,
            verdict,
            date,
            reviewers,
        } => {
            let principal = login(workflow, &auth)?;
            let decision = match verdict {
                Verdict::Approve => {
                    let Some(defense_date) = date else {
                        bail!("approving a defense requires --date");
                    };
                    let [first, second] = <[String; 2]>::try_from(reviewers)
                        .map_err(|_| anyhow::anyhow!("approving a defense requires exactly two --reviewer ids"))?;
                    DefenseDecision::Approve {
                        defense_date,
                        reviewers: [first, second],
                    }
                }
                Verdict::Reject => DefenseDecision::Reject,
            };
            workflow
                .professor(&principal)?
                .decide_defense(&thesis_id, decision)?;
            println!("Defense request {thesis_id} decided.");
        }

        Command::Review(auth) => {
            let principal = login(workflow, &auth)?;
            let queue = workflow.professor(&principal)?.theses_to_review();
            if queue.is_empty() {
                println!("No theses assigned for review.");
            }
            for entry in queue {
                println!(
                    "{:<10} {:<24} {}",
                    entry.thesis.thesis_id, entry.student.name, entry.thesis.title
                );
            }
        }

        Command::Grade {
            auth,
            thesis_id,
            grade,
        } => {
            let principal = login(workflow, &auth)?;
            let status = workflow
                .professor(&principal)?
                .submit_grade(&thesis_id, grade)?;
            println!("Grade recorded; thesis is now {}.", status.as_str());
        }

        Command::Report(auth) => {
            let principal = login(workflow, &auth)?;
            let report = workflow.professor(&principal)?.performance_report();
            let load = workflow.professor(&principal)?.load();
            println!(
                "Supervision load: {}/{} | Review load: {}/{}",
                load.supervision, load.supervision_limit, load.review, load.review_limit
            );
            println!("Supervised theses (archived): {}", report.supervised_count);
            println!("Reviewed theses (archived):   {}", report.reviewed_count);
            for entry in &report.supervised {
                println!(
                    "  {} - \"{}\" - final grade {}",
                    entry.student_name, entry.thesis_title, entry.final_grade
                );
            }
        }

        Command::Search { field, query } => {
            let field: SearchField = field.parse().map_err(anyhow::Error::msg)?;
            let results = workflow.search_archive(&query, field);
            if results.is_empty() {
                println!("No results.");
            }
            for (n, entry) in results.iter().enumerate() {
                println!("--- result {} ---", n + 1);
                println!("Title:      {}", entry.title);
                println!("Author:     {} | Year: {}", entry.author, entry.year);
                println!("Supervisor: {}", entry.supervisor);
                println!("Reviewers:  {}", entry.reviewers.join(", "));
                println!("Keywords:   {}", entry.keywords);
                println!("Abstract:   {}", entry.abstract_text);
                println!("Download:   {}", entry.download_link);
                println!(
                    "Final grade: {} ({})",
                    entry.final_grade_letter, entry.final_grade_score
                );
            }
        }
    }

    Ok(())
}

fn print_status(status: &StudentStatus) {
    match status {
        StudentStatus::NoProposal => println!("You have no submitted proposal."),
        StudentStatus::Proposal { proposal, course } => {
            let course_title = course.as_ref().map_or("unknown course", |c| c.title.as_str());
            println!("Proposal for '{course_title}'");
            println!("Requested: {}", proposal.request_date);
            println!("Status:    {}", proposal.status.as_str());
            if let Some(approved) = &proposal.approval_date {
                println!("Approved:  {approved}");
            }
        }
        StudentStatus::Defense { thesis, .. } => {
            println!("Thesis '{}'", thesis.title);
            println!("Status: {}", thesis.status.as_str());
            if let Some(date) = &thesis.defense_date {
                println!("Defense date: {date}");
            }
        }
    }
}
