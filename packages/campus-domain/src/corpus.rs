use crate::profile::UserRecord;

const ENTRY_SEPARATOR: &str = "\n\n---\n\n";

/// Flattens the full user list into the comparison corpus sent to the
/// matching oracle. Entries are sorted by id so the corpus is stable across
/// requests regardless of directory iteration order. The requesting user is
/// not filtered out here; self-exclusion is enforced during ranking.
pub fn build_corpus(users: &[UserRecord]) -> String {
	let mut sorted = users.iter().collect::<Vec<_>>();

	sorted.sort_by(|a, b| a.id.cmp(&b.id));

	sorted.iter().map(|user| profile_block(user)).collect::<Vec<_>>().join(ENTRY_SEPARATOR)
}

pub fn profile_block(user: &UserRecord) -> String {
	format!(
		"User ID: {}\nName: {}\nInterests: {}\nSkills: {}\nBio: {}",
		user.id,
		user.display_name(),
		user.interests.join(", "),
		user.skills.join(", "),
		user.bio,
	)
}
