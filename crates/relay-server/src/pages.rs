//! Static HTML served from the callback endpoint
//!
//! The browser tab that completed the provider flow lands here; the real
//! result travels to the client application through `/poll`.

/// Page shown after a successful callback exchange.
pub const SUCCESS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Success</title>
<style>
  body { margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
         background: #0b0f17; color: #e5e7eb; font-family: system-ui, -apple-system, sans-serif; }
  .card { max-width: 28rem; text-align: center; padding: 2rem; }
  .badge { width: 6rem; height: 6rem; margin: 0 auto 2rem; border-radius: 9999px;
           display: flex; align-items: center; justify-content: center;
           border: 1px solid rgba(34, 197, 94, 0.2); box-shadow: 0 0 0 4px rgba(34, 197, 94, 0.1); }
  .badge svg { width: 2.5rem; height: 2.5rem; stroke: #22c55e; }
  h1 { font-size: 2rem; margin: 0 0 1rem; color: #fff; }
  p { color: #9ca3af; font-size: 1.1rem; margin: 0 0 2.5rem; }
  button { padding: 0.75rem 2rem; border-radius: 0.75rem; font-size: 1rem; cursor: pointer;
           color: #fff; background: rgba(255, 255, 255, 0.05); border: 1px solid rgba(255, 255, 255, 0.1); }
  button:hover { background: rgba(255, 255, 255, 0.1); }
</style>
</head>
<body>
  <div class="card">
    <div class="badge">
      <svg fill="none" stroke="currentColor" viewBox="0 0 24 24">
        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="3" d="M5 13l4 4L19 7"></path>
      </svg>
    </div>
    <h1>Authentication Successful</h1>
    <p>You have successfully logged in. You can now close this window and return to your application.</p>
    <button onclick="window.close()">Close Window</button>
  </div>
</body>
</html>
"#;
