//! Landing page route.
//!
//! Serves the Sales Flow hero at `/`. The form is rendered in its idle
//! state from [`FormView`]; the page script swaps in the other views as the
//! submission progresses and draws the background from `/api/scene`.

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use salesflow_core::form::{
    FormStatus, FormView, CONFIRMATION, FALLBACK_ERROR, UNKNOWN_SERVER_ERROR,
};

use crate::state::AppState;

/// Build the UI router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(landing_page))
}

/// Every form view the page script can switch to.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormViews {
    idle: FormView,
    loading: FormView,
    success: FormView,
    error: FormView,
    unknown_error: &'static str,
    fallback_error: &'static str,
}

impl FormViews {
    fn new() -> Self {
        Self {
            idle: FormView::from(&FormStatus::Idle),
            loading: FormView::from(&FormStatus::Loading),
            success: FormView::from(&FormStatus::Success {
                message: CONFIRMATION.to_owned(),
            }),
            error: FormView::from(&FormStatus::Error {
                message: String::new(),
            }),
            unknown_error: UNKNOWN_SERVER_ERROR,
            fallback_error: FALLBACK_ERROR,
        }
    }
}

async fn landing_page() -> Html<String> {
    Html(render())
}

fn render() -> String {
    let idle = FormView::from(&FormStatus::Idle);
    // `</` would close the inline script early.
    let views = serde_json::to_string(&FormViews::new())
        .unwrap_or_else(|_| "{}".to_owned())
        .replace("</", "<\\/");

    let mut html = String::with_capacity(LANDING_HEAD.len() + LANDING_BODY.len() + 1024);
    html.push_str(LANDING_HEAD);
    let body = LANDING_BODY
        .replace("{{BUTTON_LABEL}}", idle.button_label)
        .replace("{{HELPER_TEXT}}", &idle.helper_text)
        .replace("{{HELPER_COLOR}}", idle.helper_color)
        .replace("{{FORM_VIEWS}}", &views);
    html.push_str(&body);
    html
}

/// Document head and styles.
const LANDING_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Sales Flow</title>
<meta name="description" content="Simple sales follow-up system for B2B teams"/>
<style>
body{margin:0;background:#ffffff;color:#111111;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif}
.page{position:relative;min-height:100vh}
.scene{position:absolute;inset:0;z-index:0}
.scene canvas{display:block;width:100%;height:100%}
.overlay{position:absolute;inset:0;pointer-events:none;background:linear-gradient(to bottom,rgba(255,255,255,0.88),rgba(255,255,255,0.74),rgba(255,255,255,0.92))}
.hero{position:relative;z-index:1;max-width:1100px;margin:0 auto;padding:84px 20px 70px}
.copy{max-width:640px}
.pill{display:inline-flex;align-items:center;border-radius:999px;border:1px solid rgba(0,0,0,0.10);background:rgba(255,255,255,0.65);padding:8px 12px;font-size:13px;color:rgba(0,0,0,0.72);backdrop-filter:blur(10px)}
h1{margin:18px 0 0;font-size:56px;letter-spacing:-0.03em;line-height:1.02;color:#0c0c0c}
.lead{margin:18px 0 0;font-size:18px;line-height:1.6;color:rgba(0,0,0,0.70)}
.benefits{margin:22px 0 0;padding:0;list-style:none;display:grid;gap:10px;color:rgba(0,0,0,0.82);font-size:16px}
.card{margin-top:26px;border-radius:18px;border:1px solid rgba(0,0,0,0.10);background:rgba(255,255,255,0.70);padding:14px;backdrop-filter:blur(12px)}
form{display:flex;gap:10px;flex-wrap:wrap}
input{flex:1 1 280px;height:46px;border-radius:14px;border:1px solid rgba(0,0,0,0.12);padding:0 14px;font-size:15px;outline:none;background:#fff}
button{height:46px;padding:0 18px;border-radius:14px;border:1px solid rgba(0,0,0,0.15);background:#0b0b0b;color:#fff;font-size:15px;font-weight:600;cursor:pointer}
.helper{margin:10px 2px 0;font-size:13px}
.tags{margin-top:18px;display:flex;gap:10px;flex-wrap:wrap;color:rgba(0,0,0,0.62);font-size:13px}
</style></head>
"##;

/// Page body, form script, and background renderer.
const LANDING_BODY: &str = r##"<body>
<main class="page">
  <div class="scene">
    <canvas id="scene"></canvas>
    <div class="overlay" id="overlay"></div>
  </div>
  <section class="hero">
    <div class="copy">
      <span class="pill">Sales Flow &bull; Simple follow-up system (not a CRM)</span>
      <h1>Stop losing deals because you forgot to follow up.</h1>
      <p class="lead">Sales Flow gives you one clear plan every day: who to contact, what to say, and what&rsquo;s at risk if you don&rsquo;t. Built for B2B teams that want action &mdash; not complexity.</p>
      <ul class="benefits">
        <li>&#x2705; Get more sales with consistent follow-up</li>
        <li>&#x2705; Keep more clients by staying on top of relationships</li>
        <li>&#x2705; Win back old customers with smart reminders</li>
        <li>&#x2705; Turn your pipeline into a daily action list</li>
      </ul>
      <div class="card">
        <form id="waitlist">
          <input id="email" type="email" required placeholder="Enter your email to join the waitlist"/>
          <button id="submit" type="submit">{{BUTTON_LABEL}}</button>
        </form>
        <p class="helper" id="helper" style="color:{{HELPER_COLOR}}">{{HELPER_TEXT}}</p>
      </div>
      <div class="tags">
        <span class="pill">&#x26A1; Fast setup</span>
        <span class="pill">&#x1F9E0; Daily clarity</span>
        <span class="pill">&#x1F512; Built for B2B</span>
      </div>
    </div>
  </section>
</main>
<script>
(() => {
  const views = {{FORM_VIEWS}};
  const form = document.getElementById("waitlist");
  const input = document.getElementById("email");
  const button = document.getElementById("submit");
  const helper = document.getElementById("helper");
  let loading = false;

  function show(view, message) {
    button.textContent = view.buttonLabel;
    button.disabled = view.buttonDisabled;
    button.style.opacity = String(view.buttonOpacity);
    button.style.cursor = view.cursor;
    helper.textContent = message || view.helperText;
    helper.style.color = view.helperColor;
  }

  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    if (loading) return;
    loading = true;
    show(views.loading);
    try {
      const res = await fetch("/api/waitlist", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ email: input.value }),
      });
      const data = await res.json().catch(() => null);
      if (!res.ok) throw new Error((data && data.error) || views.unknownError);
      input.value = "";
      show(views.success);
    } catch (err) {
      show(views.error, (err && err.message) || views.fallbackError);
    } finally {
      loading = false;
    }
  });
})();
</script>
<script type="module">
import * as THREE from "https://unpkg.com/three@0.160.0/build/three.module.js";

const res = await fetch("/api/scene");
if (res.ok) {
  const scene = await res.json();
  const canvas = document.getElementById("scene");
  document.getElementById("overlay").style.background = scene.overlay.background;

  const renderer = new THREE.WebGLRenderer({ canvas, antialias: true, alpha: true });
  renderer.setPixelRatio(window.devicePixelRatio);
  const camera = new THREE.PerspectiveCamera(scene.camera.fov, 1, 0.1, 1000);
  camera.position.fromArray(scene.camera.position);

  const world = new THREE.Scene();
  for (const light of scene.lights) {
    if (light.kind === "ambient") {
      world.add(new THREE.AmbientLight(0xffffff, light.intensity));
    } else {
      const node = light.kind === "directional"
        ? new THREE.DirectionalLight(0xffffff, light.intensity)
        : new THREE.PointLight(0xffffff, light.intensity);
      node.position.fromArray(light.position);
      world.add(node);
    }
  }

  const geometry = new THREE.BufferGeometry();
  geometry.setAttribute("position", new THREE.Float32BufferAttribute(scene.geometry.positions.flat(), 3));
  geometry.setIndex(scene.geometry.indices);
  geometry.computeVertexNormals();
  const material = new THREE.MeshPhysicalMaterial(scene.material);

  const group = new THREE.Group();
  for (const inst of scene.instances) {
    const mesh = new THREE.Mesh(geometry, material);
    mesh.position.fromArray(inst.position);
    mesh.rotation.set(inst.rotation[0], inst.rotation[1], inst.rotation[2]);
    group.add(mesh);
  }
  world.add(group);

  const resize = () => {
    const { clientWidth: w, clientHeight: h } = canvas.parentElement;
    renderer.setSize(w, h, false);
    camera.aspect = w / Math.max(h, 1);
    camera.updateProjectionMatrix();
  };
  window.addEventListener("resize", resize);
  resize();

  const clock = new THREE.Clock();
  const motion = scene.motion;
  renderer.setAnimationLoop(() => {
    const delta = clock.getDelta();
    const t = clock.elapsedTime;
    group.rotation.x += delta * motion.spinX;
    group.rotation.y += delta * motion.spinY;
    group.position.y = Math.sin(t * motion.bobFrequency) * motion.bobAmplitude;
    renderer.render(world, camera);
  });
}
</script>
</body></html>
"##;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use salesflow_core::form::PRIVACY_NOTE;
    use salesflow_core::recorder::LogRecorder;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;
    use crate::routes::build_router;

    #[test]
    fn idle_form_is_rendered() {
        let html = render();
        assert!(html.contains("<title>Sales Flow</title>"));
        assert!(html.contains("Simple sales follow-up system for B2B teams"));
        assert!(html.contains(">Join the waitlist</button>"));
        assert!(html.contains(PRIVACY_NOTE));
        assert!(html.contains("color:rgba(0,0,0,0.55)"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn views_are_embedded_for_the_script() {
        let html = render();
        assert!(html.contains(r#""buttonLabel":"Joining...""#));
        assert!(html.contains(r#""helperColor":"rgba(220,38,38,1)""#));
        assert!(html.contains(r#""fallbackError":"Please try again.""#));
    }

    #[tokio::test]
    async fn landing_page_is_served() {
        let state = AppState::build(&ServerConfig::default(), Arc::new(LogRecorder)).unwrap();
        let resp = build_router(Arc::new(state))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-frame-options"], "DENY");
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("id=\"waitlist\""));
    }
}
