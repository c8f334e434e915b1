//! Search over the archive of completed theses.

use gradtrack_types::{ArchiveEntry, LetterGrade, SearchField, User, mean_grade};

use gradtrack_store::Gateway;

use crate::workflow::Workflow;

/// Query the archive ({graded, defended} theses) by a single field.
///
/// Matching is case-insensitive substring containment except for year,
/// which is exact string equality against the course year. Theses whose
/// proposal cannot be resolved are dropped - a data-integrity safety net,
/// not an error.
pub(crate) fn search<S: Gateway>(
    workflow: &Workflow<S>,
    query: &str,
    field: SearchField,
) -> Vec<ArchiveEntry> {
    let users = workflow.store.users();
    let courses = workflow.store.courses();
    let proposals = workflow.store.proposals();
    let needle = query.to_lowercase();

    workflow
        .store
        .theses()
        .into_iter()
        .filter(|t| t.status.is_archived())
        .filter_map(|thesis| {
            let Some(proposal) = proposals
                .iter()
                .find(|p| p.proposal_id == thesis.proposal_id)
            else {
                tracing::warn!(
                    thesis = %thesis.thesis_id,
                    "Skipping archived thesis with unresolvable proposal"
                );
                return None;
            };

            let student = users.iter().find(|u| u.id == proposal.student_id)?;
            let course = courses.iter().find(|c| c.id == proposal.course_id)?;
            let supervisor = users.iter().find(|u| u.id == course.professor_id)?;
            let reviewers: Vec<&User> = thesis
                .reviewers
                .iter()
                .filter_map(|id| users.iter().find(|u| &u.id == id))
                .collect();

            let matched = match field {
                SearchField::Title => contains(&thesis.title, &needle),
                SearchField::Keyword => contains(&thesis.keywords, &needle),
                SearchField::Author => contains(&student.name, &needle),
                SearchField::Supervisor => contains(&supervisor.name, &needle),
                SearchField::Reviewer => reviewers.iter().any(|r| contains(&r.name, &needle)),
                SearchField::Year => query == course.year.to_string(),
            };
            if !matched {
                return None;
            }

            let score = mean_grade(&thesis.grades);
            Some(ArchiveEntry {
                title: thesis.title,
                abstract_text: thesis.abstract_text,
                keywords: thesis.keywords,
                author: student.name.clone(),
                year: course.year,
                semester: course.semester.clone(),
                supervisor: supervisor.name.clone(),
                reviewers: reviewers.iter().map(|r| r.name.clone()).collect(),
                download_link: thesis.pdf_path,
                final_grade_score: format!("{score:.2}"),
                final_grade_letter: LetterGrade::from_score(score),
            })
        })
        .collect()
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
