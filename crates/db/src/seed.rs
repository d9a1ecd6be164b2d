//! Sample listings inserted into an empty `internships` table at startup.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::internship::CreateInternship;
use crate::repositories::InternshipRepo;

struct SampleInternship {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    description: &'static str,
    url: &'static str,
    requirements: &'static str,
    salary_range: &'static str,
    duration: &'static str,
    /// `(year, month, day)`
    deadline: (i32, u32, u32),
}

const SAMPLES: &[SampleInternship] = &[
    SampleInternship {
        title: "Software Engineering Intern",
        company: "Google",
        location: "Mountain View, CA",
        description: "Work on products used by billions of people alongside experienced engineers.",
        url: "https://careers.google.com/jobs/results/123456789/",
        requirements: "Computer Science or related field, Python/Java/C++, problem solving",
        salary_range: "$8,000 - $10,000/month",
        duration: "12 weeks",
        deadline: (2027, 3, 15),
    },
    SampleInternship {
        title: "Data Science Intern",
        company: "Microsoft",
        location: "Seattle, WA",
        description: "Analyze large datasets and build machine learning models with the data science team.",
        url: "https://careers.microsoft.com/us/en/job/123456",
        requirements: "Statistics or Data Science background, Python/R, Machine Learning",
        salary_range: "$7,500 - $9,500/month",
        duration: "10-12 weeks",
        deadline: (2027, 3, 20),
    },
    SampleInternship {
        title: "Product Management Intern",
        company: "Apple",
        location: "Cupertino, CA",
        description: "Shape upcoming products together with engineering and design teams.",
        url: "https://jobs.apple.com/en-us/details/123456789",
        requirements: "Business or Engineering background, analytical skills, user experience focus",
        salary_range: "$8,500 - $11,000/month",
        duration: "12 weeks",
        deadline: (2027, 3, 10),
    },
    SampleInternship {
        title: "Frontend Developer Intern",
        company: "Meta",
        location: "Menlo Park, CA",
        description: "Build user interfaces with React and modern web technologies.",
        url: "https://www.metacareers.com/jobs/123456789/",
        requirements: "Web development experience, React/JavaScript, UI/UX understanding",
        salary_range: "$8,000 - $10,500/month",
        duration: "12-16 weeks",
        deadline: (2027, 3, 25),
    },
    SampleInternship {
        title: "Machine Learning Intern",
        company: "OpenAI",
        location: "San Francisco, CA",
        description: "Research and develop AI systems in language processing and computer vision.",
        url: "https://openai.com/careers/123456",
        requirements: "Machine Learning, Python, research experience",
        salary_range: "$9,000 - $12,000/month",
        duration: "12 weeks",
        deadline: (2027, 4, 1),
    },
];

/// Insert the sample listings if the table is empty.
///
/// Returns the number of rows inserted (0 when listings already exist).
pub async fn seed_sample_internships(pool: &PgPool) -> Result<usize, sqlx::Error> {
    if InternshipRepo::count(pool).await? > 0 {
        return Ok(0);
    }

    for sample in SAMPLES {
        let (year, month, day) = sample.deadline;
        let input = CreateInternship {
            title: sample.title.to_string(),
            company: sample.company.to_string(),
            location: Some(sample.location.to_string()),
            description: Some(sample.description.to_string()),
            url: Some(sample.url.to_string()),
            requirements: Some(sample.requirements.to_string()),
            salary_range: Some(sample.salary_range.to_string()),
            duration: Some(sample.duration.to_string()),
            application_deadline: NaiveDate::from_ymd_opt(year, month, day),
        };
        InternshipRepo::create(pool, &input).await?;
    }

    tracing::info!(count = SAMPLES.len(), "Seeded sample internships");
    Ok(SAMPLES.len())
}
