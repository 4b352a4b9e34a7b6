use serde::Serialize;

/// One listing pulled from a search result card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub location: String,
    pub title: String,
    pub salary: String,
    pub summary: String,
}

/// Column names of the exported file, in output order.
pub const CSV_HEADER: [&str; 5] = ["URL", "Title", "Location", "Salary", "Summary"];

/// A job flattened into an export row. Field order matches `CSV_HEADER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRow {
    pub url: String,
    pub title: String,
    pub location: String,
    pub salary: String,
    pub summary: String,
}

impl JobRow {
    pub fn from_job(detail_url_prefix: &str, job: Job) -> Self {
        Self {
            url: format!("{detail_url_prefix}{}", job.id),
            title: job.title,
            location: job.location,
            salary: job.salary,
            summary: job.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_links_to_detail_page() {
        let job = Job {
            id: "abc".into(),
            title: "Engineer".into(),
            location: "Seoul".into(),
            salary: "$100".into(),
            summary: "Build things".into(),
        };
        let row = JobRow::from_job("https://kr.indeed.com/jobs?q=rust&l&vjk=", job);
        assert_eq!(row.url, "https://kr.indeed.com/jobs?q=rust&l&vjk=abc");
        assert_eq!(row.title, "Engineer");
        assert_eq!(row.summary, "Build things");
    }

    #[test]
    fn missing_id_yields_bare_prefix() {
        let row = JobRow::from_job("https://example.com/view?jk=", Job::default());
        assert_eq!(row.url, "https://example.com/view?jk=");
    }
}
