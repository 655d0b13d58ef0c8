//! Backend worker: owns the tokio runtime and the HTTP client, runs each queued
//! command to completion and reports the outcome as a [`UiEvent`].

use std::thread;

use client_core::RiskClient;
use crossbeam_channel::{Receiver, Sender};
use shared::domain::AssetKind;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    assets::LoadedImage,
    events::{UiError, UiErrorContext, UiEvent},
};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, backend_url: String) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match RiskClient::connect(&backend_url) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!(backend_url = %backend_url, "invalid backend url: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!("Connected to {backend_url}")));
        tracing::info!(backend_url = %backend_url, "backend worker ready");

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(&client, cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui event receiver dropped");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}

async fn run_command(client: &RiskClient, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Analyze { id, request } => match client.analyze(&request).await {
            Ok(response) => UiEvent::AnalysisCompleted { id, response },
            Err(err) => UiEvent::AnalysisFailed {
                id,
                error: UiError::network(UiErrorContext::Analyze, &err),
            },
        },
        BackendCommand::SubmitFeedback(submission) => {
            match client.submit_feedback(&submission).await {
                Ok(()) => UiEvent::FeedbackSubmitted,
                Err(err) => UiEvent::FeedbackFailed(UiError::network(UiErrorContext::Feedback, &err)),
            }
        }
        BackendCommand::SubmitLabel(submission) => match client.submit_label(&submission).await {
            Ok(()) => UiEvent::LabelSubmitted,
            Err(err) => UiEvent::LabelFailed(UiError::network(UiErrorContext::Label, &err)),
        },
        BackendCommand::FetchAsset(request) => match request.kind {
            AssetKind::Image => {
                let result = match client.fetch_image(&request.name).await {
                    Ok(asset) => LoadedImage::decode(&asset),
                    Err(err) => Err(err),
                };
                UiEvent::ImageLoaded {
                    result: result.map_err(|err| {
                        tracing::warn!(name = %request.name, "image asset failed: {err}");
                        UiError::asset(AssetKind::Image.label(), &err)
                    }),
                    name: request.name,
                }
            }
            AssetKind::Log => {
                let result = client.fetch_log(&request.name).await;
                UiEvent::LogLoaded {
                    result: result.map(|log| log.text).map_err(|err| {
                        tracing::warn!(name = %request.name, "log asset failed: {err}");
                        UiError::asset(AssetKind::Log.label(), &err)
                    }),
                    name: request.name,
                }
            }
        },
    }
}
