use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "carehub",
    bin_name = "carehub",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Console for care-home listings, news and leads", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to carehub.toml in the OS config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Directory holding the local lead log
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit a home listing draft
    #[command(subcommand, display_order = 1)]
    Listing(ListingCommands),

    /// Manage news articles
    #[command(subcommand, display_order = 2)]
    News(NewsCommands),

    /// Tour bookings
    #[command(subcommand, display_order = 3)]
    Tours(TourCommands),

    /// Care enquiries
    #[command(subcommand, display_order = 4)]
    Enquiries(EnquiryCommands),

    /// Job applications
    #[command(subcommand, display_order = 5)]
    Applications(ApplicationCommands),

    /// Edit a FAQ list draft
    #[command(subcommand, display_order = 6)]
    Faq(FaqCommands),

    /// Admin user records
    #[command(subcommand, display_order = 7)]
    User(UserCommands),

    /// Keep a lead view open, refreshing it periodically
    #[command(display_order = 8)]
    Watch {
        /// tours, enquiries or applications
        view: String,

        /// Only show leads matching this text
        #[arg(short, long)]
        search: Option<String>,

        /// Stop after this many refreshes
        #[arg(long)]
        rounds: Option<usize>,
    },

    /// Show the effective configuration
    #[command(display_order = 9)]
    Config {
        /// Print a commented config file template instead
        #[arg(long)]
        template: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListingCommands {
    /// Start a new draft
    New {
        draft: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show a draft
    Show { draft: PathBuf },

    /// List editable fields and their kinds
    Fields,

    /// Set a text, number or flag field (e.g. homeName, statsBedrooms)
    Set {
        draft: PathBuf,
        field: String,
        value: String,
    },

    /// Add a team member
    AddMember {
        draft: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        image: Option<String>,
    },

    /// Add an activity
    AddActivity { draft: PathBuf, activity: String },

    /// Add a facility highlight
    AddFacility {
        draft: PathBuf,
        #[arg(long)]
        icon: String,
        #[arg(long)]
        title: String,
    },

    /// Add a detailed facility
    AddDetail {
        draft: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: String,
    },

    /// Add an image or video to a gallery (teamGallery, activityImages, facilitiesGallery)
    AddMedia {
        draft: PathBuf,
        gallery: String,
        url: String,
        /// Media kind; YouTube links default to video, everything else to image
        #[arg(long)]
        kind: Option<String>,
    },

    /// Remove entry N (1-based) from a list field
    Remove {
        draft: PathBuf,
        field: String,
        index: usize,
    },

    /// Move entry N (1-based) of a list field up or down
    Move {
        draft: PathBuf,
        field: String,
        index: usize,
        direction: String,
    },

    /// Set the second image shown on the listing card
    CardImage { draft: PathBuf, url: String },

    /// Copy the listing card JSON to the clipboard
    Export {
        draft: PathBuf,
        /// Export the whole record instead of the card
        #[arg(long)]
        full: bool,
        /// Print instead of copying
        #[arg(long)]
        print: bool,
    },
}

/// Fields of a news article. On update, only the given ones change.
#[derive(Args, Debug, Default, Clone)]
pub struct NewsFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
    /// events, community, awards, innovation or health-updates
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub badge: Option<String>,
    #[arg(long)]
    pub important: Option<bool>,
    /// Image URL or local file
    #[arg(long)]
    pub image: Option<String>,
    /// Gallery image URL or local file (repeatable; replaces the gallery)
    #[arg(long = "gallery")]
    pub gallery: Vec<String>,
    #[arg(long)]
    pub video_url: Option<String>,
    #[arg(long)]
    pub video_description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum NewsCommands {
    /// List news
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one article and related news
    Show { id: String },

    /// Publish a new article
    Create {
        /// Explicit id (defaults to the slugified title)
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: NewsFields,
    },

    /// Edit an article; its id never changes
    Update {
        id: String,
        #[command(flatten)]
        fields: NewsFields,
    },

    /// Delete an article
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TourCommands {
    /// List tour bookings
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Book a tour
    Book {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, default_value = "")]
        message: String,
    },

    /// Set a booking's status (requested, confirmed, completed, cancelled)
    Status { id: String, status: String },
}

#[derive(Subcommand, Debug)]
pub enum EnquiryCommands {
    /// List care enquiries
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Send a care enquiry
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long = "type", default_value = "")]
        enquiry_type: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationCommands {
    /// List job applications
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Apply for a position
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        position: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FaqCommands {
    /// Show the FAQ list
    #[command(alias = "ls")]
    List { file: PathBuf },

    /// Append a question and answer
    Add {
        file: PathBuf,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },

    /// Remove FAQ N (1-based)
    Remove { file: PathBuf, index: usize },

    /// Move FAQ N (1-based) up or down
    Move {
        file: PathBuf,
        index: usize,
        direction: String,
    },

    /// Copy the FAQ list JSON to the clipboard
    Export {
        file: PathBuf,
        #[arg(long)]
        print: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Copy a new admin user record to the clipboard
    Export {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// admin, editor or viewer
        #[arg(long, default_value = "admin")]
        role: String,
        #[arg(long)]
        print: bool,
    },
}
