//! HTML views for the login page and admin dashboard.
//!
//! Both pages are rendered from embedded templates, so the admin panel
//! works without any files in the site root.

/// Login page template. `<!-- ERROR -->` is replaced with an error box
/// when credentials are rejected.
const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Folio Admin - Login</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #16213e;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .login-container {
            background: #fff;
            padding: 40px;
            border-radius: 12px;
            box-shadow: 0 8px 32px rgba(0,0,0,0.3);
            width: 100%;
            max-width: 380px;
        }
        h1 { font-size: 24px; margin-bottom: 24px; text-align: center; }
        label { display: block; margin-bottom: 8px; font-size: 14px; color: #444; }
        input[type="password"] {
            width: 100%;
            padding: 12px;
            border: 1px solid #ccc;
            border-radius: 6px;
            font-size: 16px;
            margin-bottom: 20px;
        }
        button {
            width: 100%;
            padding: 12px;
            background: #16213e;
            border: none;
            border-radius: 6px;
            color: #fff;
            font-size: 16px;
            cursor: pointer;
        }
        .error {
            background: #fdecea;
            border: 1px solid #e74c3c;
            color: #c0392b;
            padding: 12px;
            border-radius: 6px;
            margin-bottom: 20px;
            text-align: center;
        }
    </style>
</head>
<body>
    <div class="login-container">
        <h1>Folio Admin</h1>
        <!-- ERROR -->
        <form method="POST" action="/login">
            <label for="password">Password</label>
            <input type="password" id="password" name="password" required autocomplete="current-password">
            <button type="submit">Sign In</button>
        </form>
    </div>
</body>
</html>"#;

/// Dashboard template. `<!-- DOCUMENTS -->` is replaced with the list of
/// editable documents.
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Folio Admin - Dashboard</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f4f5f7;
            color: #222;
        }
        header {
            background: #16213e;
            color: #fff;
            padding: 16px 24px;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        header a { color: #9fb4d4; text-decoration: none; font-size: 14px; }
        main { display: flex; gap: 24px; padding: 24px; max-width: 1100px; margin: 0 auto; }
        .documents { width: 260px; }
        .documents h2 { font-size: 16px; margin-bottom: 12px; }
        .documents ul { list-style: none; }
        .documents li { margin-bottom: 6px; }
        .documents button {
            width: 100%;
            text-align: left;
            padding: 10px 12px;
            background: #fff;
            border: 1px solid #ddd;
            border-radius: 6px;
            font-size: 14px;
            cursor: pointer;
        }
        .documents button.active { border-color: #16213e; font-weight: 600; }
        .documents .empty { color: #777; font-size: 14px; }
        .editor { flex: 1; display: none; flex-direction: column; }
        .editor.open { display: flex; }
        .editor h2 { font-size: 16px; margin-bottom: 12px; }
        textarea {
            width: 100%;
            min-height: 420px;
            padding: 12px;
            border: 1px solid #ddd;
            border-radius: 6px;
            font-family: 'Courier New', monospace;
            font-size: 14px;
            resize: vertical;
        }
        .editor-actions { margin-top: 12px; display: flex; align-items: center; gap: 12px; }
        .editor-actions button {
            padding: 10px 24px;
            background: #16213e;
            border: none;
            border-radius: 6px;
            color: #fff;
            font-size: 14px;
            cursor: pointer;
        }
        #status { font-size: 14px; }
        #status.ok { color: #27ae60; }
        #status.err { color: #c0392b; }
    </style>
</head>
<body>
    <header>
        <strong>Folio Admin</strong>
        <a href="/logout">Log out</a>
    </header>
    <main>
        <section class="documents">
            <h2>Documents</h2>
            <!-- DOCUMENTS -->
        </section>
        <section class="editor" id="editor">
            <h2 id="editor-title"></h2>
            <textarea id="content" spellcheck="false"></textarea>
            <div class="editor-actions">
                <button id="save">Save</button>
                <span id="status"></span>
            </div>
        </section>
    </main>
    <script>
        let current = null;
        const editor = document.getElementById('editor');
        const title = document.getElementById('editor-title');
        const content = document.getElementById('content');
        const status = document.getElementById('status');

        function setStatus(message, ok) {
            status.textContent = message;
            status.className = ok ? 'ok' : 'err';
        }

        async function openDocument(name, button) {
            document.querySelectorAll('.documents button').forEach(b => b.classList.remove('active'));
            button.classList.add('active');
            const response = await fetch('/api/get/' + encodeURIComponent(name));
            if (!response.ok) {
                setStatus('Failed to load ' + name, false);
                return;
            }
            const data = await response.json();
            current = name;
            title.textContent = name;
            content.value = JSON.stringify(data, null, 2);
            editor.classList.add('open');
            setStatus('', true);
        }

        document.querySelectorAll('.documents button').forEach(button => {
            button.addEventListener('click', () => openDocument(button.dataset.name, button));
        });

        document.getElementById('save').addEventListener('click', async () => {
            if (!current) return;
            let parsed;
            try {
                parsed = JSON.parse(content.value);
            } catch (e) {
                setStatus('Not valid JSON: ' + e.message, false);
                return;
            }
            const response = await fetch('/api/save/' + encodeURIComponent(current), {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(parsed),
            });
            if (response.ok) {
                const ack = await response.json();
                setStatus(ack.message, true);
            } else {
                setStatus('Save failed (' + response.status + ')', false);
            }
        });
    </script>
</body>
</html>"#;

/// Render the login page, optionally with an error message.
pub(crate) fn login_page(error: Option<&str>) -> String {
    match error {
        Some(message) => LOGIN_HTML.replace(
            "<!-- ERROR -->",
            &format!(r#"<div class="error">{}</div>"#, html_escape(message)),
        ),
        None => LOGIN_HTML.to_owned(),
    }
}

/// Render the dashboard with the list of editable documents.
pub(crate) fn dashboard_page(documents: &[String]) -> String {
    let list = if documents.is_empty() {
        r#"<p class="empty">No documents yet. Saving through the API creates them.</p>"#.to_owned()
    } else {
        let items: String = documents
            .iter()
            .map(|name| {
                let escaped = html_escape(name);
                format!(r#"<li><button data-name="{escaped}">{escaped}</button></li>"#)
            })
            .collect();
        format!("<ul>{items}</ul>")
    };
    DASHBOARD_HTML.replace("<!-- DOCUMENTS -->", &list)
}

/// Escape text for embedding into HTML.
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
