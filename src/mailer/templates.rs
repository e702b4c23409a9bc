//! HTML and plain-text bodies for outbound email.

use crate::db::ContactMessage;

const STYLE: &str = "body { font-family: 'Segoe UI', Arial, sans-serif; background: #0a0a0a; \
     color: #fff; margin: 0; padding: 20px; } \
     .container { max-width: 600px; margin: 0 auto; background: #111; border: 1px solid #222; \
     border-radius: 12px; overflow: hidden; } \
     .header { background: linear-gradient(135deg, #00ff9d 0%, #00cc7d 100%); padding: 24px; } \
     .header h1 { margin: 0; color: #000; font-size: 24px; } \
     .content { padding: 24px; line-height: 1.6; } \
     .label { font-size: 10px; text-transform: uppercase; letter-spacing: 1px; color: #666; } \
     .value { font-size: 16px; color: #fff; background: #1a1a1a; padding: 12px 16px; \
     border-radius: 8px; border-left: 3px solid #00ff9d; white-space: pre-wrap; } \
     .footer { padding: 16px 24px; background: #0a0a0a; border-top: 1px solid #222; \
     font-size: 12px; color: #666; text-align: center; }";

fn received_at(msg: &ContactMessage) -> String {
    msg.created_at.format("%b %d, %Y at %H:%M").to_string()
}

pub fn admin_subject(msg: &ContactMessage) -> String {
    format!("New Contact: {}", msg.name)
}

pub fn admin_html(msg: &ContactMessage) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><style>{STYLE}</style></head>
<body>
    <div class="container">
        <div class="header"><h1>New Message Received</h1></div>
        <div class="content">
            <div class="label">From</div>
            <div class="value">{name}</div>
            <div class="label">Email</div>
            <div class="value"><a href="mailto:{email}" style="color: #00ff9d;">{email}</a></div>
            <div class="label">Message</div>
            <div class="value">{message}</div>
        </div>
        <div class="footer">Sent from your Portfolio Contact Form - {received}</div>
    </div>
</body>
</html>
"#,
        name = msg.name,
        email = msg.email,
        message = msg.message,
        received = received_at(msg),
    )
}

pub fn admin_text(msg: &ContactMessage) -> String {
    format!(
        "New Contact Form Submission\n\
         ===========================\n\n\
         From: {}\n\
         Email: {}\n\n\
         Message:\n{}\n\n\
         ---\n\
         Received: {}\n",
        msg.name,
        msg.email,
        msg.message,
        received_at(msg),
    )
}

pub const THANK_YOU_SUBJECT: &str = "Thank you for reaching out!";

pub fn thank_you_html(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><style>{STYLE}</style></head>
<body>
    <div class="container">
        <div class="header"><h1>Thank You for Your Message</h1></div>
        <div class="content">
            <p>Hi {name},</p>
            <p>Thank you for reaching out! I have received your message and appreciate you taking the time to contact me.</p>
            <p>I will review your message and get back to you as soon as possible, typically within 1-2 business days.</p>
            <p>Best regards</p>
        </div>
        <div class="footer">This is an automated response - Please do not reply directly to this email</div>
    </div>
</body>
</html>
"#,
    )
}

pub fn thank_you_text(name: &str) -> String {
    format!(
        "Hi {name},\n\n\
         Thank you for reaching out! I have received your message and appreciate you taking the time to contact me.\n\n\
         I will review your message and get back to you as soon as possible, typically within 1-2 business days.\n\n\
         Best regards\n\n\
         ---\n\
         This is an automated response - Please do not reply directly to this email\n",
    )
}

pub const TEST_SUBJECT: &str = "Portfolio API - Email Test";
pub const TEST_TEXT: &str =
    "This is a test email from your portfolio API. Email configuration is working correctly!";
pub const TEST_HTML: &str = "<p>This is a test email from your portfolio API. \
     <strong>Email configuration is working correctly!</strong></p>";
