/// Display names that title-casing would get wrong.
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("nodejs", "Node.js"),
    ("node.js", "Node.js"),
    ("reactjs", "React.js"),
    ("vuejs", "Vue.js"),
    ("angularjs", "Angular.js"),
    ("mysql", "MySQL"),
    ("postgresql", "PostgreSQL"),
    ("mongodb", "MongoDB"),
    ("aws", "AWS"),
    ("gcp", "Google Cloud Platform"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sql", "SQL"),
    ("api", "API"),
    ("rest", "REST"),
    ("graphql", "GraphQL"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("jenkins", "Jenkins"),
    ("git", "Git"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("jira", "JIRA"),
    ("ci/cd", "CI/CD"),
    ("devops", "DevOps"),
    ("mlops", "MLOps"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("scikit-learn", "Scikit-learn"),
    ("pandas", "Pandas"),
    ("numpy", "NumPy"),
];

/// Canonical display form of a catalog key, e.g. `"javascript"` → `"JavaScript"`.
pub fn display_name(key: &str) -> String {
    let lowered = key.to_lowercase();
    SPECIAL_CASES
        .iter()
        .find(|(k, _)| *k == lowered)
        .map(|(_, v)| v.to_string())
        .unwrap_or_else(|| title_case(key))
}

/// Upper-cases every letter that does not follow another letter and
/// lower-cases the rest: `"ruby on rails"` → `"Ruby On Rails"`, `"d3.js"` → `"D3.Js"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}
