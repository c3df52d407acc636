//! Demo data for empty databases, inserted through the regular store API.

use anyhow::{Context, Result};
use tracing::info;

use crate::models::blog::NewBlogPost;
use crate::models::company::NewCompany;
use crate::models::job::NewJob;
use crate::storage::JobBoardStore;

struct CompanySeed {
    name: &'static str,
    description: &'static str,
    website: &'static str,
    industry: &'static str,
    size: &'static str,
    location: &'static str,
}

struct JobSeed {
    /// Index into `COMPANIES`.
    company: usize,
    title: &'static str,
    description: &'static str,
    requirements: &'static str,
    responsibilities: &'static str,
    location: &'static str,
    job_type: &'static str,
    experience_level: &'static str,
    salary: (i32, i32),
    skills: &'static [&'static str],
}

struct PostSeed {
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    slug: &'static str,
    category: &'static str,
    author: &'static str,
    tags: &'static [&'static str],
}

const COMPANIES: &[CompanySeed] = &[
    CompanySeed {
        name: "TechCorp Solutions",
        description: "Technology company specializing in AI and machine learning solutions",
        website: "https://techcorp.example.com",
        industry: "Technology",
        size: "500-1000 employees",
        location: "San Francisco, CA",
    },
    CompanySeed {
        name: "DataMind Analytics",
        description: "Data analytics and business intelligence platform",
        website: "https://datamind.example.com",
        industry: "Data Analytics",
        size: "50-200 employees",
        location: "New York, NY",
    },
    CompanySeed {
        name: "CloudScale Systems",
        description: "Cloud infrastructure and DevOps automation",
        website: "https://cloudscale.example.com",
        industry: "Cloud Computing",
        size: "200-500 employees",
        location: "Seattle, WA",
    },
    CompanySeed {
        name: "InnovateTech Startups",
        description: "Startup building mobile applications",
        website: "https://innovatetech.example.com",
        industry: "Mobile Technology",
        size: "10-50 employees",
        location: "Austin, TX",
    },
    CompanySeed {
        name: "GlobalSoft Enterprise",
        description: "Enterprise software for large organisations",
        website: "https://globalsoft.example.com",
        industry: "Enterprise Software",
        size: "1000+ employees",
        location: "Boston, MA",
    },
];

const JOBS: &[JobSeed] = &[
    JobSeed {
        company: 0,
        title: "Senior Full Stack Developer",
        description: "Build scalable web applications on React, Node.js and PostgreSQL.",
        requirements: "5+ years with JavaScript/TypeScript\nReact and Node.js\nPostgreSQL\nA major cloud platform",
        responsibilities: "Design and ship full-stack features\nReview code\nMentor junior developers",
        location: "San Francisco, CA",
        job_type: "full-time",
        experience_level: "senior",
        salary: (120_000, 180_000),
        skills: &["React", "Node.js", "TypeScript", "PostgreSQL", "AWS"],
    },
    JobSeed {
        company: 1,
        title: "Data Scientist",
        description: "Drive business decisions through analytics and machine learning on large datasets.",
        requirements: "3+ years with Python or R\nMachine learning fundamentals\nSQL and big data tooling",
        responsibilities: "Analyse datasets\nBuild and deploy models\nPresent findings to stakeholders",
        location: "New York, NY",
        job_type: "full-time",
        experience_level: "mid",
        salary: (100_000, 150_000),
        skills: &["Python", "Machine Learning", "SQL", "TensorFlow", "Pandas"],
    },
    JobSeed {
        company: 2,
        title: "DevOps Engineer",
        description: "Automate infrastructure and improve deployment pipelines.",
        requirements: "4+ years of DevOps\nDocker and Kubernetes\nAWS or Azure\nPython or Bash",
        responsibilities: "Maintain CI/CD pipelines\nManage cloud infrastructure\nMonitor system performance",
        location: "Seattle, WA",
        job_type: "full-time",
        experience_level: "mid",
        salary: (110_000, 160_000),
        skills: &["Docker", "Kubernetes", "AWS", "Python", "Jenkins"],
    },
    JobSeed {
        company: 3,
        title: "Frontend Developer",
        description: "Create mobile user interfaces with a focus on user experience.",
        requirements: "2+ years of frontend development\nReact Native or Flutter\nState management libraries",
        responsibilities: "Build iOS and Android features\nImplement accessible UI components\nOptimise app performance",
        location: "Austin, TX",
        job_type: "full-time",
        experience_level: "entry",
        salary: (80_000, 120_000),
        skills: &["React Native", "JavaScript", "Mobile Development", "UI/UX", "Redux"],
    },
    JobSeed {
        company: 4,
        title: "Product Manager",
        description: "Lead enterprise software initiatives with engineering, design and sales.",
        requirements: "5+ years of product management\nEnterprise software background\nAgile delivery",
        responsibilities: "Own strategy and roadmap\nPrioritise requirements\nRun product launches",
        location: "Boston, MA",
        job_type: "full-time",
        experience_level: "senior",
        salary: (130_000, 190_000),
        skills: &["Product Management", "Strategy", "Analytics", "Agile", "Leadership"],
    },
    JobSeed {
        company: 0,
        title: "UX/UI Designer",
        description: "Design user-centred experiences across the product line.",
        requirements: "3+ years of UX/UI design\nFigma or Sketch\nUser research methods",
        responsibilities: "Produce wireframes and prototypes\nRun usability tests\nMaintain the design system",
        location: "Remote",
        job_type: "remote",
        experience_level: "mid",
        salary: (90_000, 140_000),
        skills: &["Figma", "User Research", "Prototyping", "Design Systems", "Usability Testing"],
    },
];

const POSTS: &[PostSeed] = &[
    PostSeed {
        title: "10 Essential Tips for Landing Your Dream Tech Job",
        excerpt: "Strategic preparation that helps you stand out in a tech job search.",
        content: "Build a strong portfolio, keep your skills current, network actively, \
                  practise coding challenges and tailor your resume to every application.",
        slug: "10-essential-tips-landing-dream-tech-job",
        category: "Career Tips",
        author: "Sarah Johnson",
        tags: &["Career Advice", "Tech Jobs", "Interview Tips", "Professional Development"],
    },
    PostSeed {
        title: "How to Write a Resume That Gets You Interviews",
        excerpt: "Create a resume that passes applicant tracking systems and reaches hiring managers.",
        content: "Lead with measurable achievements, mirror the wording of the job description \
                  and keep the layout simple enough for automated parsers.",
        slug: "how-to-write-resume-gets-interviews",
        category: "Resume Tips",
        author: "Michael Chen",
        tags: &["Resume Writing", "Job Search", "Career Advice", "ATS Optimization"],
    },
    PostSeed {
        title: "Remote Work: Best Practices for Productivity and Success",
        excerpt: "Stay productive and connected while working from home.",
        content: "Set up a dedicated workspace, agree on communication norms with your team \
                  and protect the boundary between work and personal time.",
        slug: "remote-work-best-practices-productivity-success",
        category: "Remote Work",
        author: "Emily Rodriguez",
        tags: &["Remote Work", "Productivity", "Work-Life Balance", "Professional Development"],
    },
    PostSeed {
        title: "Networking Strategies That Actually Work",
        excerpt: "Build genuine professional relationships by offering value first.",
        content: "Follow up after events, share useful resources and keep in touch with \
                  former colleagues long before you need a referral.",
        slug: "networking-strategies-that-actually-work",
        category: "Networking",
        author: "David Kim",
        tags: &["Networking", "Professional Relationships", "Career Growth", "Communication Skills"],
    },
    PostSeed {
        title: "Mastering the Art of Salary Negotiation",
        excerpt: "Research, timing and conversation techniques for fair compensation.",
        content: "Research market rates, let the employer make the first offer where possible \
                  and negotiate the whole package rather than base salary alone.",
        slug: "mastering-art-salary-negotiation",
        category: "Interview Tips",
        author: "Lisa Thompson",
        tags: &["Salary Negotiation", "Career Advancement", "Professional Development", "Interview Skills"],
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Inserts the demo companies, jobs and blog posts unless a company already
/// exists. Returns whether anything was inserted.
pub async fn seed_demo_data(store: &dyn JobBoardStore) -> Result<bool> {
    if !store.get_companies().await?.is_empty() {
        info!("Database already has companies, skipping demo seed");
        return Ok(false);
    }

    let mut company_ids = Vec::with_capacity(COMPANIES.len());
    for c in COMPANIES {
        let company = store
            .create_company(NewCompany {
                name: c.name.to_string(),
                description: Some(c.description.to_string()),
                website: Some(c.website.to_string()),
                logo: None,
                industry: Some(c.industry.to_string()),
                size: Some(c.size.to_string()),
                location: Some(c.location.to_string()),
            })
            .await
            .with_context(|| format!("seeding company '{}'", c.name))?;
        company_ids.push(company.id);
    }
    info!("Seeded {} companies", company_ids.len());

    for j in JOBS {
        store
            .create_job(NewJob {
                title: j.title.to_string(),
                description: j.description.to_string(),
                requirements: Some(j.requirements.to_string()),
                responsibilities: Some(j.responsibilities.to_string()),
                company_id: company_ids[j.company],
                location: j.location.to_string(),
                job_type: j.job_type.to_string(),
                experience_level: Some(j.experience_level.to_string()),
                salary_min: Some(j.salary.0),
                salary_max: Some(j.salary.1),
                skills: owned(j.skills),
                is_active: true,
                expires_at: None,
            })
            .await
            .with_context(|| format!("seeding job '{}'", j.title))?;
    }
    info!("Seeded {} jobs", JOBS.len());

    for p in POSTS {
        store
            .create_blog_post(NewBlogPost {
                title: p.title.to_string(),
                content: p.content.to_string(),
                excerpt: p.excerpt.to_string(),
                slug: p.slug.to_string(),
                category: p.category.to_string(),
                author: p.author.to_string(),
                author_avatar: None,
                featured_image: None,
                tags: owned(p.tags),
                is_published: true,
            })
            .await
            .with_context(|| format!("seeding blog post '{}'", p.slug))?;
    }
    info!("Seeded {} blog posts", POSTS.len());

    Ok(true)
}
