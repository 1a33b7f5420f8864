use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    #[validate(
        required(message = "Missing assignment ID"),
        length(min = 1, message = "Missing assignment ID")
    )]
    pub assignment_id: Option<String>,
    #[validate(
        required(message = "Missing student ID"),
        length(min = 1, message = "Missing student ID")
    )]
    pub student_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachMediaRequest {
    #[validate(
        required(message = "Missing media URL"),
        length(min = 1, message = "Missing media URL")
    )]
    pub media_url: Option<String>,
}

/// Query string for `GET /api/submissions`. `userId` is accepted for `studentId`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsQuery {
    #[serde(alias = "userId")]
    pub student_id: Option<String>,
    pub role: Option<String>,
    pub assignment_id: Option<String>,
}
