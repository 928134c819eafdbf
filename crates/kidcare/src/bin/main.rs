//! kidcare command-line interface

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use kidcare::cli::{
    Session, appointments, children, doctors, medications, output, parse_date, parse_time, prompt,
    vaccinations,
};
use kidcare::engine::{NewMedication, VaccineStatus};
use kidcare::model::{ChildId, DoctorId, Gender, RecordId, SlotId, UserId};
use std::path::PathBuf;

/// Child vaccination tracker and appointment booking
#[derive(Parser)]
#[command(name = "kidcare")]
#[command(author, version, about = "Child vaccination tracking and appointment booking", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, pretty, table)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    /// Data file holding every table
    #[arg(short, long, env = "KIDCARE_DATA", default_value = "kidcare.json", global = true)]
    data: PathBuf,

    /// Vaccine catalog (JSON) used when the data file does not exist yet
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a child's vaccination status grouped by age
    Status {
        /// Child id
        child: ChildId,

        /// Only show records with this status (due, completed, upcoming)
        #[arg(long, value_parser = vaccinations::parse_status)]
        only: Option<VaccineStatus>,
    },

    /// Mark a vaccination completed, or undo it
    Toggle {
        /// Child id
        child: ChildId,

        /// Vaccination record id
        record: RecordId,
    },

    /// Register a child and create its vaccination records
    Register {
        /// Parent account id
        #[arg(long)]
        parent: UserId,

        /// Child's name
        #[arg(long)]
        name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        dob: NaiveDate,

        /// Gender (Male, Female, Other)
        #[arg(long)]
        gender: Gender,

        /// Place of birth
        #[arg(long)]
        place: Option<String>,

        /// Birth health issue (repeatable), e.g. "Jaundice" or "Low birth weight"
        #[arg(short, long = "issue")]
        issues: Vec<String>,
    },

    /// List a parent's children
    Children {
        /// Parent account id
        parent: UserId,
    },

    /// List a doctor's open slots from today on
    Slots {
        /// Doctor id
        doctor: DoctorId,
    },

    /// Offer a new appointment slot
    AddSlot {
        /// Doctor id
        doctor: DoctorId,

        /// Date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,

        /// End time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },

    /// Withdraw an unbooked slot
    RemoveSlot {
        /// Slot id
        slot: SlotId,
    },

    /// Book an open slot
    Book {
        /// Doctor id
        doctor: DoctorId,

        /// Slot id
        slot: SlotId,

        /// Account making the booking
        #[arg(long)]
        requester: UserId,

        /// Book for this child instead of the requester
        #[arg(long)]
        child: Option<ChildId>,

        /// Notes for the doctor
        #[arg(long)]
        notes: Option<String>,
    },

    /// Search the doctor directory
    Doctors {
        /// Location contains this text (case-insensitive)
        #[arg(short, long)]
        location: Option<String>,

        /// Exact specialization
        #[arg(short, long)]
        specialization: Option<String>,
    },

    /// List a child's medications
    Medications {
        /// Child id
        child: ChildId,
    },

    /// Record a prescription
    AddMedication {
        /// Child id
        child: ChildId,

        /// Health issue treated
        #[arg(long = "for")]
        health_issue: String,

        /// Medicine name
        #[arg(long)]
        medicine: String,

        #[arg(long)]
        dosage: String,

        #[arg(long)]
        frequency: String,

        #[arg(long)]
        duration: String,

        /// Prescribing doctor
        #[arg(long)]
        doctor: String,

        /// Doctor's phone or email
        #[arg(long)]
        contact: Option<String>,

        /// Prescription date (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date)]
        prescribed: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Print the health recommendation prompts for a child
    Prompt {
        /// Child id
        child: ChildId,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Set up color output
    output::setup_colors(&cli.color);

    init_logging(cli.verbose);

    let format = output::OutputFormat::parse(cli.format.as_deref().unwrap_or("table"));
    let session = Session::new(cli.data, cli.today)
        .with_format(format)
        .with_output(cli.output)
        .with_catalog(cli.catalog);

    let result = match cli.command {
        Commands::Status { child, only } => {
            let config = vaccinations::StatusConfig { child, only };
            vaccinations::status(&session, config).await
        }

        Commands::Toggle { child, record } => {
            let config = vaccinations::ToggleConfig { child, record };
            vaccinations::toggle(&session, config).await
        }

        Commands::Register {
            parent,
            name,
            dob,
            gender,
            place,
            issues,
        } => {
            let config = children::RegisterConfig {
                parent,
                name,
                date_of_birth: dob,
                gender,
                place_of_birth: place,
                health_issues: issues,
            };
            children::register(&session, config).await
        }

        Commands::Children { parent } => {
            let config = children::ChildrenConfig { parent };
            children::children(&session, config).await
        }

        Commands::Slots { doctor } => {
            let config = appointments::SlotsConfig { doctor };
            appointments::slots(&session, config).await
        }

        Commands::AddSlot {
            doctor,
            date,
            start,
            end,
        } => {
            let config = appointments::AddSlotConfig {
                doctor,
                date,
                start,
                end,
            };
            appointments::add_slot(&session, config).await
        }

        Commands::RemoveSlot { slot } => {
            let config = appointments::RemoveSlotConfig { slot };
            appointments::remove_slot(&session, config).await
        }

        Commands::Book {
            doctor,
            slot,
            requester,
            child,
            notes,
        } => {
            let config = appointments::BookConfig {
                doctor,
                slot,
                requester,
                child,
                notes,
            };
            appointments::book(&session, config).await
        }

        Commands::Doctors {
            location,
            specialization,
        } => {
            let config = doctors::DoctorsConfig {
                location,
                specialization,
            };
            doctors::doctors(&session, config).await
        }

        Commands::Medications { child } => {
            let config = medications::MedicationsConfig { child };
            medications::medications(&session, config).await
        }

        Commands::AddMedication {
            child,
            health_issue,
            medicine,
            dosage,
            frequency,
            duration,
            doctor,
            contact,
            prescribed,
            notes,
        } => {
            let config = medications::AddMedicationConfig {
                child,
                medication: NewMedication {
                    health_issue,
                    medicine_name: medicine,
                    dosage,
                    frequency,
                    duration,
                    doctor_name: doctor,
                    doctor_contact: contact,
                    prescribed_date: prescribed,
                    notes,
                },
            };
            medications::add(&session, config).await
        }

        Commands::Prompt { child } => {
            let config = prompt::PromptConfig { child };
            prompt::prompt(&session, config).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
