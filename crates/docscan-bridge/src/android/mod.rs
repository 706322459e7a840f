// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method calls into the ART runtime.
//
// ## Architecture notes
//
// The host Activity owns the Java objects: the plugin's result reporter and
// the engine's scan view. It passes them in once when the session is created
// and the bridge keeps global references for the session's lifetime.
//
// Engine callbacks flow the other way. The Activity's listener converts each
// one into an `EngineEvent` and hands it to the session controller on the UI
// thread; nothing in this module dispatches events.

#![cfg(target_os = "android")]

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::JNIEnv;
use serde_json::{Map, Value};

use docscan_core::error::{DocscanError, Result};
use docscan_core::Outcome;

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Run `f` with a [`JNIEnv`] attached to the current thread.
///
/// Uses `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by the NDK glue, attaching the thread for the duration of the call.
fn with_env<T>(f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| DocscanError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| DocscanError::Bridge(format!("failed to attach JNI thread: {e}")))?;
    f(&mut env)
}

/// Obtain the hosting `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(DocscanError::Bridge(
            "Android context is null, native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `DocscanError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> DocscanError {
    DocscanError::Bridge(format!("{context}: {e}"))
}

/// Call a no-argument `void` method on `target`.
fn call_void(target: &GlobalRef, method: &str) -> Result<()> {
    with_env(|env| {
        env.call_method(target, method, "()V", &[])
            .map_err(|e| jni_err(method, e))?;
        Ok(())
    })
}

/// The app's private cache directory (`Context.getCacheDir()`).
pub fn cache_dir() -> Result<std::path::PathBuf> {
    let activity = activity()?;
    with_env(|env| {
        let dir: JObject = env
            .call_method(&activity, "getCacheDir", "()Ljava/io/File;", &[])
            .map_err(|e| jni_err("getCacheDir", e))?
            .l()
            .map_err(|e| jni_err("getCacheDir->l", e))?;

        let path: JObject = env
            .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .map_err(|e| jni_err("getAbsolutePath", e))?
            .l()
            .map_err(|e| jni_err("getAbsolutePath->l", e))?;

        let path: String = env
            .get_string(&JString::from(path))
            .map_err(|e| jni_err("get_string(cacheDir)", e))?
            .into();

        Ok(std::path::PathBuf::from(path))
    })
}

// ---------------------------------------------------------------------------
// ShellBridge: plugin result reporter
// ---------------------------------------------------------------------------

/// Delivers results through the plugin's Java reporter object.
///
/// The reporter must expose `void onResult(String json, boolean keepAlive,
/// boolean isError)`; the Activity is finished to dismiss the surface.
pub struct AndroidShell {
    reporter: GlobalRef,
}

impl AndroidShell {
    /// Wrap the reporter object the Activity received from the plugin.
    pub fn new(env: &mut JNIEnv<'_>, reporter: &JObject<'_>) -> Result<Self> {
        let reporter = env
            .new_global_ref(reporter)
            .map_err(|e| jni_err("new_global_ref(reporter)", e))?;
        Ok(Self { reporter })
    }
}

impl ShellBridge for AndroidShell {
    fn send_result(&self, outcome: Outcome, json: &str, keep_alive: bool) -> Result<()> {
        tracing::info!(?outcome, keep_alive, "Android: reporting result to shell");
        with_env(|env| {
            let j_json: JString = env
                .new_string(json)
                .map_err(|e| jni_err("new_string(json)", e))?;

            env.call_method(
                &self.reporter,
                "onResult",
                "(Ljava/lang/String;ZZ)V",
                &[
                    JValue::Object(&j_json),
                    JValue::Bool(u8::from(keep_alive)),
                    JValue::Bool(u8::from(outcome == Outcome::Error)),
                ],
            )
            .map_err(|e| jni_err("ResultReporter.onResult", e))?;
            Ok(())
        })
    }

    fn dismiss_surface(&self) -> Result<()> {
        let activity = activity()?;
        with_env(|env| {
            env.call_method(&activity, "finish", "()V", &[])
                .map_err(|e| jni_err("Activity.finish", e))?;
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// ScanEngine: the engine's document scan view
// ---------------------------------------------------------------------------

/// Drives the engine through its scan view object.
///
/// `init` goes through `initFromNative(String licenseKey, String optionsJson)`,
/// a thin Java shim that builds the engine's view config and registers the
/// Activity's listener.
pub struct AndroidScanView {
    view: GlobalRef,
}

impl AndroidScanView {
    pub fn new(env: &mut JNIEnv<'_>, view: &JObject<'_>) -> Result<Self> {
        let view = env
            .new_global_ref(view)
            .map_err(|e| jni_err("new_global_ref(scanView)", e))?;
        Ok(Self { view })
    }
}

impl ScanEngine for AndroidScanView {
    fn init(&mut self, license_key: &str, options: &Map<String, Value>) -> Result<()> {
        let options_json = serde_json::to_string(options)?;
        with_env(|env| {
            let j_key: JString = env
                .new_string(license_key)
                .map_err(|e| jni_err("new_string(licenseKey)", e))?;
            let j_options: JString = env
                .new_string(&options_json)
                .map_err(|e| jni_err("new_string(options)", e))?;

            env.call_method(
                &self.view,
                "initFromNative",
                "(Ljava/lang/String;Ljava/lang/String;)V",
                &[JValue::Object(&j_key), JValue::Object(&j_options)],
            )
            .map_err(|e| jni_err("initFromNative", e))?;
            Ok(())
        })
    }

    fn start_scanning(&mut self) -> Result<()> {
        call_void(&self.view, "startScanning")
    }

    fn cancel_scanning(&mut self) -> Result<()> {
        call_void(&self.view, "cancelScanning")
    }

    fn release_camera_in_background(&mut self) -> Result<()> {
        call_void(&self.view, "releaseCameraInBackground")
    }
}
