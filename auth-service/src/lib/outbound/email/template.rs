use crate::account::models::VerificationEmail;

pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// Render the HTML body of the verification email.
///
/// The link is `{verification_url}/{user_id}`.
pub fn render(verification_url: &str, email: &VerificationEmail) -> String {
    let link = format!(
        "{}/{}",
        verification_url.trim_end_matches('/'),
        email.user_id.as_str()
    );
    let link = escape(&link);
    let name = escape(&email.name);

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <body>\n\
         <p>Hi {name},</p>\n\
         <p>Thanks for signing up. Please confirm your email address by following the link below.</p>\n\
         <p><a href=\"{link}\">{link}</a></p>\n\
         <p>If you did not create an account, you can ignore this message.</p>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
