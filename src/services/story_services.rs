// src/services/story_services.rs - artifact generator adapter
//
// The external generator is treated as slow and unreliable: one attempt with
// a hard wall-clock timeout, and every failure mode (spawn error, nonzero
// exit, unparseable stdout, success=false, timeout) folds into the same
// deterministic fallback story. Post creation never fails because of it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use log::{error, warn};
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;

pub const DEFAULT_DESCRIPTION: &str = "A crafted piece";
pub const DEFAULT_STORY_TYPE: &str = "The story should be leaned towards indian culture";

/// What the generator process is expected to print on stdout.
#[derive(Debug, Deserialize)]
struct GeneratorOutput {
    success: bool,
    story: Option<String>,
    audio_path: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedStory {
    pub story: String,
    pub audio_path: Option<String>,
}

#[derive(Clone)]
pub struct StoryGenerator {
    python_cmd: String,
    script: PathBuf,
    timeout: Duration,
}

impl StoryGenerator {
    pub fn new(python_cmd: String, script: PathBuf, timeout: Duration) -> Self {
        Self {
            python_cmd,
            script,
            timeout,
        }
    }

    /// One attempt at the external generator, then the fallback. Never fails.
    pub async fn generate(
        &self,
        image_path: &Path,
        description: Option<&str>,
        story_type: Option<&str>,
        out_dir: &Path,
    ) -> GeneratedStory {
        let description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => DEFAULT_DESCRIPTION,
        };
        let story_type = match story_type.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_STORY_TYPE,
        };

        match self.invoke(image_path, description, story_type, out_dir).await {
            Some(story) => story,
            None => GeneratedStory {
                story: fallback_story(description, story_type),
                audio_path: None,
            },
        }
    }

    async fn invoke(
        &self,
        image_path: &Path,
        description: &str,
        story_type: &str,
        out_dir: &Path,
    ) -> Option<GeneratedStory> {
        let mut command = Command::new(&self.python_cmd);
        command
            .arg(&self.script)
            .arg(image_path)
            .arg(description)
            .arg(story_type)
            .arg(out_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // the child must not outlive the timeout below
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                error!("story generator failed to launch: {}", err);
                return None;
            }
            Err(_) => {
                error!(
                    "story generator timed out after {}s, killing it",
                    self.timeout.as_secs()
                );
                return None;
            }
        };

        if !output.stderr.is_empty() {
            warn!(
                "story generator stderr: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        if !output.status.success() {
            error!("story generator exited with {}", output.status);
            return None;
        }

        let parsed: GeneratorOutput = match serde_json::from_slice(&output.stdout) {
            Ok(parsed) => parsed,
            Err(err) => {
                error!("story generator produced unparseable output: {}", err);
                return None;
            }
        };
        if !parsed.success {
            error!(
                "story generator reported failure: {}",
                parsed.error.as_deref().unwrap_or("unknown")
            );
            return None;
        }
        let story = parsed.story?;

        // generated audio lands in the uploads dir; expose it by public path
        let audio_path = parsed.audio_path.as_deref().and_then(|p| {
            Path::new(p)
                .file_name()
                .map(|name| format!("/uploads/{}", name.to_string_lossy()))
        });

        Some(GeneratedStory { story, audio_path })
    }
}

/// Fixed-template narrative synthesized from the supplied hints. Deterministic
/// for a given (description, story_type) pair.
pub fn fallback_story(description: &str, story_type: &str) -> String {
    format!(
        "In the heart of a traditional workshop, where ancient techniques meet passionate artistry, this remarkable piece came to life. {description}\n\n\
The master craftsperson began their work in the early morning hours, when the light was soft and the world was quiet. With hands that carried the wisdom of generations, they carefully selected each material, understanding that every choice would contribute to the final masterpiece.\n\n\
{story_type} This cultural heritage flows through every deliberate movement, every careful stroke, every moment of patient creation. The techniques used have been passed down through families for centuries, each generation adding their own touch while preserving the essential spirit of the craft.\n\n\
As the work progressed, the piece began to tell its own story. The subtle variations in texture, the gentle curves that speak of human touch, the imperfections that make it uniquely beautiful – all these elements combine to create something far more valuable than mere function.\n\n\
This is not just an object; it is a bridge between past and present, a tangible connection to cultural roots, and a testament to the enduring power of human creativity. In a world increasingly dominated by machines, this piece stands as a proud reminder of what hands guided by heart and heritage can achieve.\n\n\
The finished work carries within it the soul of its maker and the spirit of its cultural tradition, ready to become part of someone's story, adding its own chapter to the endless narrative of human artistic expression."
    )
}
