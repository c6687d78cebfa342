//! Skill catalog — the keyword tables every matcher reads, compiled once.
//!
//! The raw tables are plain `const` data grouped category → subcategory →
//! keyword, and every keyword is a skill of its own: `django` under
//! `programming_languages/python` is recorded as "Django", never as "Python".
//! `SkillCatalog::new` turns them into a typed lookup keyed by display name.
//! A keyword listed under several subcategories (`react`, `mysql`,
//! `cloudformation`) becomes one `CatalogSkill` with several placements, the
//! first declaration being its primary placement. Keywords that share a
//! display name (`gcp`, `google cloud platform`) also share one record.
//!
//! The compiled catalog is immutable and meant to be shared as `Arc<SkillCatalog>`.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::naming::{display_name, title_case};
use crate::errors::AnalysisError;

// ────────────────────────────────────────────────────────────────────────────
// Raw tables
// ────────────────────────────────────────────────────────────────────────────

pub struct CategoryTable {
    pub name: &'static str,
    pub subcategories: &'static [(&'static str, &'static [&'static str])],
}

pub const PROGRAMMING_LANGUAGES: &str = "programming_languages";
pub const WEB_TECHNOLOGIES: &str = "web_technologies";
pub const DATABASES: &str = "databases";
pub const CLOUD_PLATFORMS: &str = "cloud_platforms";
pub const DEVOPS_TOOLS: &str = "devops_tools";
pub const DATA_SCIENCE: &str = "data_science";
pub const SECURITY: &str = "security";
pub const TESTING: &str = "testing";

/// Keywords are lower-case. Language subcategories group a language with its
/// ecosystem; each keyword is still matched and reported on its own.
pub const TECHNICAL_SKILLS: &[CategoryTable] = &[
    CategoryTable {
        name: PROGRAMMING_LANGUAGES,
        subcategories: &[
            ("python", &["python", "py", "django", "flask", "fastapi", "pandas", "numpy"]),
            ("javascript", &["javascript", "js", "node.js", "nodejs", "react", "vue", "angular"]),
            ("java", &["java", "spring", "hibernate", "maven", "gradle"]),
            ("c++", &["c++", "cpp", "c plus plus"]),
            ("c#", &["c#", "csharp", "c sharp", ".net", "asp.net"]),
            ("php", &["php", "laravel", "symfony", "codeigniter"]),
            ("ruby", &["ruby", "rails", "ruby on rails"]),
            ("go", &["golang", "go lang"]),
            ("rust", &["rust", "cargo"]),
            ("swift", &["swift", "ios"]),
            ("kotlin", &["kotlin", "android"]),
            ("scala", &["scala", "akka"]),
            ("typescript", &["typescript", "ts"]),
            ("r", &["r programming", "r language"]),
            ("matlab", &["matlab", "simulink"]),
            ("perl", &["perl"]),
            ("shell", &["bash", "shell scripting", "powershell"]),
            ("sql", &["sql", "mysql", "postgresql", "sqlite", "oracle", "sql server"]),
        ],
    },
    CategoryTable {
        name: WEB_TECHNOLOGIES,
        subcategories: &[
            (
                "frontend",
                &[
                    "html",
                    "css",
                    "sass",
                    "less",
                    "bootstrap",
                    "tailwind",
                    "material-ui",
                    "chakra-ui",
                ],
            ),
            ("backend", &["express", "koa", "fastify", "spring boot", "django rest", "flask api"]),
            ("frameworks", &["react", "angular", "vue", "svelte", "ember", "backbone"]),
            ("mobile", &["react native", "flutter", "ionic", "xamarin", "cordova"]),
            ("cms", &["wordpress", "drupal", "joomla", "contentful", "strapi"]),
        ],
    },
    CategoryTable {
        name: DATABASES,
        subcategories: &[
            ("relational", &["mysql", "postgresql", "sqlite", "oracle", "sql server", "mariadb"]),
            ("nosql", &["mongodb", "cassandra", "couchdb", "neo4j", "dynamodb"]),
            ("cache", &["redis", "memcached", "elasticsearch"]),
            ("data_warehouse", &["snowflake", "bigquery", "redshift", "databricks"]),
        ],
    },
    CategoryTable {
        name: CLOUD_PLATFORMS,
        subcategories: &[
            (
                "aws",
                &["aws", "amazon web services", "ec2", "s3", "lambda", "rds", "cloudformation"],
            ),
            ("azure", &["azure", "microsoft azure", "azure functions", "azure sql"]),
            (
                "gcp",
                &["gcp", "google cloud", "google cloud platform", "app engine", "cloud functions"],
            ),
            ("others", &["heroku", "digitalocean", "linode", "vultr", "vercel", "netlify"]),
        ],
    },
    CategoryTable {
        name: DEVOPS_TOOLS,
        subcategories: &[
            ("containerization", &["docker", "kubernetes", "podman", "containerd"]),
            (
                "ci_cd",
                &[
                    "jenkins",
                    "github actions",
                    "gitlab ci",
                    "travis ci",
                    "circleci",
                    "azure devops",
                ],
            ),
            ("infrastructure", &["terraform", "ansible", "puppet", "chef", "cloudformation"]),
            (
                "monitoring",
                &["prometheus", "grafana", "elk stack", "splunk", "datadog", "new relic"],
            ),
            ("version_control", &["git", "github", "gitlab", "bitbucket", "svn"]),
        ],
    },
    CategoryTable {
        name: DATA_SCIENCE,
        subcategories: &[
            ("libraries", &["pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras"]),
            ("visualization", &["matplotlib", "seaborn", "plotly", "bokeh", "d3.js"]),
            ("big_data", &["spark", "hadoop", "kafka", "airflow", "dask"]),
            ("ml_ops", &["mlflow", "kubeflow", "sagemaker", "azure ml"]),
        ],
    },
    CategoryTable {
        name: SECURITY,
        subcategories: &[
            ("tools", &["nmap", "wireshark", "metasploit", "burp suite", "owasp"]),
            (
                "concepts",
                &["penetration testing", "vulnerability assessment", "encryption", "ssl/tls"],
            ),
        ],
    },
    CategoryTable {
        name: TESTING,
        subcategories: &[
            ("frameworks", &["jest", "mocha", "pytest", "junit", "selenium", "cypress"]),
            (
                "types",
                &["unit testing", "integration testing", "e2e testing", "performance testing"],
            ),
        ],
    },
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "critical thinking",
    "project management",
    "time management",
    "adaptability",
    "creativity",
    "collaboration",
    "analytical skills",
    "decision making",
    "conflict resolution",
    "mentoring",
    "coaching",
    "public speaking",
    "presentation skills",
    "negotiation",
    "customer service",
    "strategic thinking",
    "innovation",
    "emotional intelligence",
    "stress management",
];

pub const CERTIFICATIONS: &[&str] = &[
    "aws certified",
    "azure certified",
    "google cloud certified",
    "cissp",
    "cism",
    "cisa",
    "pmp",
    "scrum master",
    "agile",
    "itil",
    "comptia",
    "cisco certified",
    "microsoft certified",
    "oracle certified",
    "salesforce certified",
    "kubernetes certified",
];

/// Domain label → keywords; a domain is present when any keyword appears as a whole word.
pub const INDUSTRY_DOMAINS: &[(&str, &[&str])] = &[
    ("Agile Development", &["agile", "scrum", "kanban", "sprint"]),
    ("DevOps", &["devops", "ci/cd", "continuous integration", "deployment"]),
    ("Machine Learning", &["machine learning", "ml", "ai", "artificial intelligence"]),
    ("Data Science", &["data science", "data analysis", "analytics", "big data"]),
    ("Cybersecurity", &["security", "cybersecurity", "encryption", "penetration testing"]),
    ("Cloud Computing", &["cloud", "serverless", "microservices", "containerization"]),
    (
        "Mobile Development",
        &["mobile", "app development", "ios development", "android development"],
    ),
    ("Web Development", &["web development", "frontend", "backend", "full stack"]),
    ("UI/UX Design", &["ui", "ux", "user experience", "user interface", "design"]),
    ("Quality Assurance", &["qa", "testing", "automation testing", "unit testing"]),
];

// ────────────────────────────────────────────────────────────────────────────
// Compiled catalog
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub category: String,
    pub subcategory: String,
}

/// A canonical skill with its compiled matchers.
#[derive(Debug)]
pub struct CatalogSkill {
    /// First keyword declared for this display name.
    pub key: &'static str,
    pub name: String,
    /// Every keyword reported under `name`, declaration order.
    pub keywords: Vec<&'static str>,
    /// Every (category, subcategory) the skill is declared under, catalog order.
    pub placements: Vec<Placement>,
    /// Case-insensitive matchers for every keyword variant. Word boundaries are
    /// checked by the matcher, since `\b` misreads keywords like `c++` and `.net`.
    pub variants: Vec<Regex>,
    /// `<kw>…N years`, `N years…<kw>`, `<kw>…N yrs`, `N yrs…<kw>` over lower-cased text.
    pub years_patterns: Vec<Regex>,
}

impl CatalogSkill {
    pub fn primary(&self) -> &Placement {
        &self.placements[0]
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.placements.iter().any(|p| p.category == category)
    }
}

/// A flat-list entry (soft skill, certification) or industry domain.
#[derive(Debug)]
pub struct KeywordGroup {
    pub label: String,
    pub pattern: Regex,
}

#[derive(Debug)]
pub struct SkillCatalog {
    skills: Vec<CatalogSkill>,
    soft_skills: Vec<KeywordGroup>,
    certifications: Vec<KeywordGroup>,
    industry_domains: Vec<KeywordGroup>,
}

impl SkillCatalog {
    /// Compiles the built-in tables.
    pub fn new() -> Result<Self, AnalysisError> {
        Self::from_tables(
            TECHNICAL_SKILLS,
            SOFT_SKILLS,
            CERTIFICATIONS,
            INDUSTRY_DOMAINS,
        )
    }

    pub fn from_tables(
        technical: &[CategoryTable],
        soft_skills: &[&str],
        certifications: &[&str],
        industry_domains: &[(&str, &[&str])],
    ) -> Result<Self, AnalysisError> {
        let mut skills: Vec<CatalogSkill> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for category in technical {
            for (subcategory, keywords) in category.subcategories {
                for &keyword in *keywords {
                    let placement = Placement {
                        category: category.name.to_string(),
                        subcategory: subcategory.to_string(),
                    };
                    let name = display_name(keyword);
                    match index.get(&name).copied() {
                        Some(i) => {
                            let skill = &mut skills[i];
                            if !skill.placements.contains(&placement) {
                                skill.placements.push(placement);
                            }
                            if !skill.keywords.contains(&keyword) {
                                skill.keywords.push(keyword);
                            }
                        }
                        None => {
                            index.insert(name.clone(), skills.len());
                            skills.push(CatalogSkill {
                                key: keyword,
                                name,
                                keywords: vec![keyword],
                                placements: vec![placement],
                                variants: Vec::new(),
                                years_patterns: Vec::new(),
                            });
                        }
                    }
                }
            }
        }

        for skill in &mut skills {
            let mut seen: Vec<String> = Vec::new();
            for kw in &skill.keywords {
                for variant in keyword_variants(kw) {
                    if !seen.contains(&variant) {
                        skill
                            .variants
                            .push(Regex::new(&format!("(?i){}", regex::escape(&variant)))?);
                        seen.push(variant);
                    }
                }
            }
            skill.years_patterns = years_patterns(skill.key)?;
        }

        Ok(Self {
            skills,
            soft_skills: flat_groups(soft_skills)?,
            certifications: flat_groups(certifications)?,
            industry_domains: industry_domains
                .iter()
                .map(|(label, keywords)| {
                    Ok(KeywordGroup {
                        label: label.to_string(),
                        pattern: whole_word_alternation(keywords)?,
                    })
                })
                .collect::<Result<_, regex::Error>>()?,
        })
    }

    /// Skills in first-declaration order.
    pub fn skills(&self) -> &[CatalogSkill] {
        &self.skills
    }

    pub fn soft_skills(&self) -> &[KeywordGroup] {
        &self.soft_skills
    }

    pub fn certifications(&self) -> &[KeywordGroup] {
        &self.certifications
    }

    pub fn industry_domains(&self) -> &[KeywordGroup] {
        &self.industry_domains
    }

    /// The skill that reports `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&CatalogSkill> {
        self.skills.iter().find(|s| s.keywords.contains(&keyword))
    }
}

/// The keyword as written, with spaces removed, with hyphens as spaces, and
/// with dots removed. Variants shorter than two characters are dropped, and a
/// leading-dot keyword (`.net`) keeps its dot.
pub fn keyword_variants(keyword: &str) -> Vec<String> {
    let mut variants = vec![keyword.to_string()];
    variants.push(keyword.replace(' ', ""));
    variants.push(keyword.replace('-', " "));
    if !keyword.starts_with('.') {
        variants.push(keyword.replace('.', ""));
    }

    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for v in variants {
        if v.chars().count() >= 2 && !unique.contains(&v) {
            unique.push(v);
        }
    }
    unique
}

/// `(?s)` lets the gap between keyword and count span line breaks.
fn years_patterns(keyword: &str) -> Result<Vec<Regex>, regex::Error> {
    let kw = regex::escape(keyword);
    [
        format!(r"(?s){kw}.*?(\d+)\+?\s*years?"),
        format!(r"(?s)(\d+)\+?\s*years?.*?{kw}"),
        format!(r"(?s){kw}.*?(\d+)\+?\s*yrs?"),
        format!(r"(?s)(\d+)\+?\s*yrs?.*?{kw}"),
    ]
    .iter()
    .map(|p| Regex::new(p))
    .collect()
}

fn flat_groups(keywords: &[&str]) -> Result<Vec<KeywordGroup>, regex::Error> {
    keywords
        .iter()
        .map(|kw| {
            Ok(KeywordGroup {
                label: title_case(kw),
                pattern: whole_word_alternation(&[*kw])?,
            })
        })
        .collect()
}

fn whole_word_alternation(keywords: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
}
