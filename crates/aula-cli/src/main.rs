use aula::modules::users::UserService;
use aula_cli::seeder::{self, SeedConfig, StaffCounts};
use aula_models::ExtraFields;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "aula-cli")]
#[command(about = "Aula CLI - Administrative tools for Aula", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a superuser account (staff and superuser flags set)
    CreateSuperuser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create a staff account that is not a superuser
    CreateStaff {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Create the account inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Seed the database with fake courses, students and staff
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "200")]
        students: usize,

        /// Number of courses to create
        #[arg(long, default_value = "10")]
        courses: usize,

        /// Number of subjects to create
        #[arg(long, default_value = "12")]
        subjects: usize,

        /// Number of comment categories to create
        #[arg(long, default_value = "5")]
        categories: usize,

        /// Number of principals to create
        #[arg(long, default_value = "1")]
        principals: usize,

        /// Number of preceptors to create
        #[arg(long, default_value = "4")]
        preceptors: usize,

        /// Number of professors to create
        #[arg(long, default_value = "12")]
        professors: usize,
    },
    /// Clear all school records and seeded users (keeps other users)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateSuperuser { email, password } => {
            handle_create_superuser(&pool, email, password).await
        }
        Commands::CreateStaff {
            email,
            password,
            inactive,
        } => handle_create_staff(&pool, email, password, inactive).await,
        Commands::Seed {
            students,
            courses,
            subjects,
            categories,
            principals,
            preceptors,
            professors,
        } => {
            let config = SeedConfig::new(students)
                .with_courses(courses)
                .with_subjects(subjects)
                .with_categories(categories)
                .with_staff(StaffCounts {
                    principals,
                    preceptors,
                    professors,
                });
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt_credentials(email: Option<String>, password: Option<String>) -> (String, String) {
    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    (email, password)
}

async fn handle_create_superuser(
    pool: &sqlx::postgres::PgPool,
    email: Option<String>,
    password: Option<String>,
) {
    let (email, password) = prompt_credentials(email, password);

    match UserService::create_superuser(pool, &email, &password, ExtraFields::default()).await {
        Ok(user) => {
            println!("\n✅ Superuser created successfully!");
            println!("   Email: {}", user.email);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating superuser: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_create_staff(
    pool: &sqlx::postgres::PgPool,
    email: Option<String>,
    password: Option<String>,
    inactive: bool,
) {
    let (email, password) = prompt_credentials(email, password);
    let extra = ExtraFields {
        is_active: Some(!inactive),
        ..ExtraFields::default()
    };

    match UserService::create_staff_user(pool, &email, &password, extra).await {
        Ok(user) => {
            println!("\n✅ Staff user created successfully!");
            println!("   Email: {}", user.email);
            if !user.is_active {
                println!("   Account is inactive");
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error creating staff user: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &sqlx::postgres::PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &sqlx::postgres::PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
