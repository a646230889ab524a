//! Starter document for newly registered domains.

/// The page a domain publishes until its owner edits it.
///
/// The name appears verbatim in the heading and in the inline script.
pub fn default_document(domain_name: &str) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <title>My New Website</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }}
        h1 {{ color: #333; }}
    </style>
</head>
<body>
    <h1>Welcome to {domain_name}</h1>
    <p>This is your new website. Start editing to make it your own!</p>
    <script>
        // Your JavaScript code here
        console.log('Welcome to {domain_name}');
    </script>
</body>
</html>"#
    )
}
