//! Fixed option sets for the multi-select search fields.
//!
//! Each entry is `(value, label)`. The value is what the Apollo API expects;
//! the label is for rendering the option in a client form.

use serde::Serialize;

/// Apollo industry tags. Values are industry tag ids.
pub const INDUSTRIES: &[(&str, &str)] = &[
    ("5567e27c7369642ade490000", "alternative medicine"),
    ("5567e36f73696431a4970000", "animation"),
    ("5567cd82736964540d0b0000", "apparel & fashion"),
    ("5567cdb77369645401080000", "architecture & planning"),
    ("5567cd4d73696439d9030000", "arts & crafts"),
    ("5567cdf27369644cfd800000", "automotive"),
    ("5567e0dd73696416d3c20100", "aviation & aerospace"),
    ("5567ce237369644ee5490000", "banking"),
    ("5567d08e7369645dbc4b0000", "biotechnology"),
    ("5567e0f973696416d34e0200", "broadcast media"),
    ("5567e1a17369641ea9d30100", "building materials"),
    ("5567e0fa73696410e4c51200", "business supplies & equipment"),
    ("5567cdb773696439a9080000", "capital markets"),
    ("5567e21e73696426a1030000", "chemicals"),
    ("5567cdda7369644eed130000", "civic & social organization"),
    ("5567e13a73696418756e0200", "civil engineering"),
    ("5567e1887369641d68d40100", "commercial real estate"),
    ("5567cd877369644cf94b0000", "computer & network security"),
    ("5567cd8b736964540d0f0000", "computer games"),
    ("5567e0d47369641233eb0600", "computer hardware"),
    ("5567cdbe7369643b78360000", "computer networking"),
    ("5567cd4e7369643b70010000", "computer software"),
    ("5567cd4773696439dd350000", "construction"),
    ("5567e1947369641ead570000", "consumer electronics"),
    ("5567ce987369643b789e0000", "consumer goods"),
    ("5567d1127261697f2b1d0000", "consumer services"),
    ("5567e1ae73696423dc040000", "cosmetics"),
    ("5567e8a27369646ddb0b0000", "dairy"),
    ("5567e1097369641b5f810500", "defense & space"),
    ("5567cdbc73696439d90b0000", "design"),
    ("5567cd4c73696453e1300000", "higher education"),
    ("5567cdde73696439812c0000", "hospital & health care"),
    ("5567ce9d7369643bc19c0000", "hospitality"),
    ("5567e0e37369640e5ac10c00", "human resources"),
    ("5567ce9d7369645430c50000", "import & export"),
    ("5567d02b7369645d8b140000", "individual & family services"),
    ("5567e1337369641ad2970000", "industrial automation"),
    ("5567e0c97369640d2b3b1600", "information services"),
    ("5567cd4773696439b10b0000", "information technology & services"),
    ("5567cdd973696453d93f0000", "insurance"),
    ("5567e3657369642f4ec90000", "international affairs"),
    ("5567ce9c7369644eed680000", "international trade & development"),
    ("5567cd4d736964397e020000", "internet"),
    ("5567e1ab7369641f6d660100", "investment banking"),
    ("5567e0bc7369641d11550200", "investment management"),
    ("55680a8273696407b61f0000", "judiciary"),
    ("5567e0e073696408da441e00", "law enforcement"),
    ("5567cd4d7369644d513e0000", "printing"),
    ("5567cd49736964541d010000", "professional training & coaching"),
    ("5567e2907369642433e60200", "program development"),
    ("5567e28a7369642ae2500000", "public policy"),
    ("5567ce5973696453d9780000", "public relations & communications"),
    ("5567cd4a7369643ba9010000", "public safety"),
    ("5567ce5b73696439a17a0000", "publishing"),
    ("5567e14673696416d38c0300", "railroad manufacture"),
    ("5567fd5a73696442b0f20000", "ranching"),
    ("5567cd477369645401010000", "real estate"),
    ("5567e134736964214f5e0000", "recreational facilities & services"),
    ("5567e0f27369640e5aed0c00", "religious institutions"),
    ("5567cd49736964540d020000", "renewables & environment"),
    ("5567e09f736964160ebb0100", "research"),
    ("5567e0e0736964198de70700", "restaurants"),
    ("5567ced173696450cb580000", "retail"),
    ("5567e19b7369641ead740000", "security & investigations"),
    ("5567e0d87369640e5aa30c00", "semiconductors"),
];

pub const SENIORITIES: &[(&str, &str)] = &[
    ("owner", "Owner"),
    ("founder", "Founder"),
    ("c_suite", "C-Suite"),
    ("partner", "Partner"),
    ("vp", "VP"),
    ("head", "Head"),
    ("director", "Director"),
    ("manager", "Manager"),
    ("senior", "Senior"),
    ("entry", "Entry"),
    ("intern", "Intern"),
];

/// Apollo person title tags, sent as `person_titles` to people search.
pub const JOB_TITLES: &[(&str, &str)] = &[
    ("manager", "Manager"),
    ("project manager", "Project Manager"),
    ("teacher", "Teacher"),
    ("owner", "Owner"),
    ("student", "Student"),
    ("director", "Director"),
    ("software engineer", "Software Engineer"),
    ("consultant", "Consultant"),
    ("account manager", "Account Manager"),
    ("engineer", "Engineer"),
    ("professor", "Professor"),
    ("sales manager", "Sales Manager"),
    ("sales", "Sales"),
    ("partner", "Partner"),
    ("associate", "Associate"),
    ("president", "President"),
    ("administrative assistant", "Administrative Assistant"),
    ("supervisor", "Supervisor"),
    ("general manager", "General Manager"),
    ("realtor", "Realtor"),
];

pub const PER_PAGE_CHOICES: [u32; 4] = [10, 25, 50, 100];
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Returns true when `value` is one of the option values in `choices`.
pub fn is_valid(choices: &[(&str, &str)], value: &str) -> bool {
    choices.iter().any(|(v, _)| *v == value)
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Option sets served by `GET /api/choices`.
#[derive(Debug, Clone, Serialize)]
pub struct ChoicesResponse {
    pub industries: Vec<ChoiceOption>,
    pub job_titles: Vec<ChoiceOption>,
    pub seniorities: Vec<ChoiceOption>,
    pub per_page: Vec<u32>,
    pub default_per_page: u32,
}

impl ChoicesResponse {
    pub fn new() -> Self {
        Self {
            industries: options(INDUSTRIES),
            job_titles: options(JOB_TITLES),
            seniorities: options(SENIORITIES),
            per_page: PER_PAGE_CHOICES.to_vec(),
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Default for ChoicesResponse {
    fn default() -> Self {
        Self::new()
    }
}

fn options(choices: &[(&'static str, &'static str)]) -> Vec<ChoiceOption> {
    choices
        .iter()
        .map(|&(value, label)| ChoiceOption { value, label })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_option_values_are_unique() {
        for choices in [INDUSTRIES, SENIORITIES, JOB_TITLES] {
            let unique: HashSet<_> = choices.iter().map(|(v, _)| v).collect();
            assert_eq!(unique.len(), choices.len());
        }
    }

    #[test]
    fn test_is_valid_matches_values_not_labels() {
        assert!(is_valid(INDUSTRIES, "5567cd4e7369643b70010000"));
        assert!(!is_valid(INDUSTRIES, "computer software"));
        assert!(is_valid(SENIORITIES, "c_suite"));
        assert!(!is_valid(JOB_TITLES, "astronaut"));
    }

    #[test]
    fn test_choices_response_lists_everything() {
        let response = ChoicesResponse::new();
        assert_eq!(response.industries.len(), INDUSTRIES.len());
        assert_eq!(response.per_page, vec![10, 25, 50, 100]);
        assert!(response.per_page.contains(&response.default_per_page));
    }
}
