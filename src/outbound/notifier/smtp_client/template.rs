use chrono::Datelike;

use crate::configuration::SiteSettings;

pub fn render_resource_email(title: &str, link: &str, site: &SiteSettings) -> String {
    let year = chrono::Utc::now().year();
    format!(
        r#"<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body>
  <div>
    <p>Here it is. I hope you find it useful: <a href="{link}">Open</a></p>
    <br>
    <p>If the link does not work, copy this URL: {link}</p>
    <br>
    <p>If you have any questions, just reply to this email.</p>
    <br>
    <p>&copy; {year} <a href="{url}">{site_title}</a></p>
  </div>
</body>
</html>"#,
        title = title,
        link = link,
        year = year,
        url = site.url,
        site_title = site.title,
    )
}
