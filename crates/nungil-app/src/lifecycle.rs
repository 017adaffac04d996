//! OS 시그널 대기.

use tracing::info;

/// SIGINT/SIGTERM (비 unix에서는 Ctrl+C)이 올 때까지 대기
pub async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigint = signal(SignalKind::interrupt()).expect("SIGINT 핸들러 등록 실패");
        let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM 핸들러 등록 실패");

        tokio::select! {
            _ = sigint.recv() => {
                info!("SIGINT 수신");
            }
            _ = sigterm.recv() => {
                info!("SIGTERM 수신");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl+C 핸들러 등록 실패");
        info!("Ctrl+C 수신");
    }
}
