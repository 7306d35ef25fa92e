use travelsplit_application::ProcessError;
use travelsplit_i18n as i18n;

pub fn format_process_error(error: &ProcessError) -> String {
    match error {
        ProcessError::NoPayments => i18n::NO_PAYMENTS.to_string(),
        other => other.to_string(),
    }
}
