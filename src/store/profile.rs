//! Profile slice.

use crate::models::Profile;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    FetchPending,
    FetchFulfilled(Profile),
    FetchRejected(String),
    UpdatePending,
    UpdateFulfilled(Profile),
    UpdateRejected(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSlice {
    pub profile_data: Option<Profile>,
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl ProfileSlice {
    pub fn reduce(&mut self, action: ProfileAction) {
        match action {
            ProfileAction::FetchPending | ProfileAction::UpdatePending => {
                self.loading = true;
                self.error = None;
            }
            ProfileAction::FetchFulfilled(profile) | ProfileAction::UpdateFulfilled(profile) => {
                self.loading = false;
                self.profile_data = Some(profile);
                self.revision += 1;
            }
            // profile_data is left as it was
            ProfileAction::FetchRejected(message) | ProfileAction::UpdateRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            ProfileAction::Clear => {
                *self = ProfileSlice {
                    revision: self.revision + 1,
                    ..ProfileSlice::default()
                };
            }
        }
    }
}
