// 报名确认邮件的 HTML 模板

pub const ENROLLMENT_SUBJECT: &str = "Xác nhận đăng ký khóa học";

pub struct EnrollmentEmail<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub classroom_name: &'a str,
    pub course_name: &'a str,
    pub note: Option<&'a str>,
}

/// 所有字段先转义再插入模板
pub fn enrollment_confirmation(data: &EnrollmentEmail<'_>) -> String {
    let full_name = escape_html(data.full_name);
    let email = escape_html(data.email);
    let phone_number = escape_html(data.phone_number);
    let classroom_name = escape_html(data.classroom_name);
    let course_name = escape_html(data.course_name);
    let note_row = match data.note {
        Some(note) if !note.is_empty() => format!(
            "\n<tr>\n<td style=\"padding: 8px 0; font-weight: bold; color: #555; vertical-align: top;\">Ghi chú:</td>\n<td style=\"padding: 8px 0; color: #333;\">{}</td>\n</tr>",
            escape_html(note)
        ),
        _ => String::new(),
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto;">
<div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 30px; text-align: center; border-radius: 10px 10px 0 0;">
<h1 style="color: white; margin: 0; font-size: 24px;">Xác Nhận Đăng Ký Khóa Học</h1>
</div>
<div style="background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e0e0e0;">
<p style="font-size: 16px; margin-bottom: 20px;">Xin chào <strong>{full_name}</strong>,</p>
<p style="font-size: 16px; margin-bottom: 20px;">Cảm ơn bạn đã đăng ký khóa học tại hệ thống của chúng tôi. Chúng tôi đã nhận được thông tin đăng ký của bạn:</p>
<div style="background: white; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 4px solid #667eea;">
<table style="width: 100%; border-collapse: collapse;">
<tr>
<td style="padding: 8px 0; font-weight: bold; width: 150px; color: #555;">Họ và tên:</td>
<td style="padding: 8px 0; color: #333;">{full_name}</td>
</tr>
<tr>
<td style="padding: 8px 0; font-weight: bold; color: #555;">Email:</td>
<td style="padding: 8px 0; color: #333;">{email}</td>
</tr>
<tr>
<td style="padding: 8px 0; font-weight: bold; color: #555;">Số điện thoại:</td>
<td style="padding: 8px 0; color: #333;">{phone_number}</td>
</tr>
<tr>
<td style="padding: 8px 0; font-weight: bold; color: #555;">Lớp học:</td>
<td style="padding: 8px 0; color: #333;">{classroom_name}</td>
</tr>
<tr>
<td style="padding: 8px 0; font-weight: bold; color: #555;">Khóa học:</td>
<td style="padding: 8px 0; color: #333;">{course_name}</td>
</tr>{note_row}
</table>
</div>
<p style="font-size: 16px; margin: 20px 0;">Chúng tôi sẽ xem xét đăng ký của bạn và liên hệ lại với bạn trong thời gian sớm nhất qua email hoặc số điện thoại bạn đã cung cấp.</p>
<p style="font-size: 16px; margin-top: 30px;">Trân trọng,<br><strong>Ban Quản Lý Hệ Thống</strong></p>
</div>
<div style="text-align: center; padding: 20px; color: #999; font-size: 12px;">
<p style="margin: 5px 0;">Email này được gửi tự động, vui lòng không trả lời email này.</p>
</div>
</div>"#
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample<'a>(note: Option<&'a str>) -> EnrollmentEmail<'a> {
        EnrollmentEmail {
            full_name: "Nguyễn Văn A",
            email: "a@example.com",
            phone_number: "0901234567",
            classroom_name: "Classroom A101",
            course_name: "Lập trình Web",
            note,
        }
    }

    #[test]
    fn escape_html_replaces_dangerous_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn confirmation_contains_all_registration_fields() {
        let html = enrollment_confirmation(&sample(None));
        assert!(html.contains("Nguyễn Văn A"));
        assert!(html.contains("a@example.com"));
        assert!(html.contains("0901234567"));
        assert!(html.contains("Classroom A101"));
        assert!(html.contains("Lập trình Web"));
        assert!(!html.contains("Ghi chú"));
    }

    #[test]
    fn note_row_is_rendered_when_present() {
        let html = enrollment_confirmation(&sample(Some("Học buổi tối")));
        assert!(html.contains("Ghi chú"));
        assert!(html.contains("Học buổi tối"));
    }

    #[test]
    fn user_supplied_html_is_escaped_in_body() {
        let html = enrollment_confirmation(&EnrollmentEmail {
            full_name: "<script>alert(1)</script>",
            ..sample(None)
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
