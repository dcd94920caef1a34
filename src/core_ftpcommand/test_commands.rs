// End-to-end tests: a real session served over loopback, driven by scripted
// client transcripts. Data rides the control connection, so each script's
// full server output is deterministic and asserted byte for byte.

use crate::config::Config;
use crate::core_network::network::handle_connection;
use crate::core_transfer::codec::TransferType;
use crate::session::Session;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.server.listen_addr = String::from("127.0.0.1");
    config.server.listen_port = 0;
    config.server.chroot_dir = root.to_string_lossy().into_owned();
    config
}

async fn spawn_session(
    config: Config,
) -> (TcpStream, Arc<Mutex<Session>>, JoinHandle<anyhow::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let session = Arc::new(Mutex::new(Session::new()));
    let server_session = Arc::clone(&session);
    let config = Arc::new(config);

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        handle_connection(socket, config, server_session).await
    });

    let client = TcpStream::connect(addr).await.unwrap();
    (client, session, server)
}

/// Sends one script, half-closes, and returns everything the server wrote.
async fn run_script(root: &Path, script: &[u8]) -> Vec<u8> {
    let (mut client, _session, server) = spawn_session(test_config(root)).await;
    client.write_all(script).await.unwrap();
    client.shutdown().await.unwrap();

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();
    response
}

#[tokio::test]
async fn user_and_pass_accept_anything() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"USER alice\r\nPASS whatever\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          331 Username OK, need password.\r\n\
          230 User logged in, proceed.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn quit_closes_the_connection_without_client_eof() {
    let root = tempdir().unwrap();
    let (mut client, _session, server) = spawn_session(test_config(root.path())).await;

    // No half-close here: the server must hang up on its own after QUIT.
    client.write_all(b"QUIT\r\n").await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn client_eof_ends_the_session_cleanly() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"USER alice\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n331 Username OK, need password.\r\n"
    );
}

#[tokio::test]
async fn unknown_verb_answers_502_and_leaves_session_alone() {
    let root = tempdir().unwrap();
    let (mut client, session, server) = spawn_session(test_config(root.path())).await;

    client.write_all(b"FOO bar\r\nQUIT\r\n").await.unwrap();
    client.shutdown().await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          502 Command not implemented.\r\n\
          221 Goodbye.\r\n"
    );
    let session = session.lock().await;
    assert_eq!(session.transfer_type, TransferType::Binary);
    assert!(session.rename_from.is_none());
}

#[tokio::test]
async fn verbs_are_case_insensitive() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("hello.txt"), b"hello world").unwrap();

    let response = run_script(root.path(), b"get hello.txt\r\nquit\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Opening data connection.\r\nhello world\
          226 Transfer complete.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn get_streams_file_bytes_between_marks() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("hello.txt"), b"hello world").unwrap();

    let response = run_script(root.path(), b"GET hello.txt\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Opening data connection.\r\nhello world\
          226 Transfer complete.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn get_in_binary_mode_does_not_touch_line_endings() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("raw.bin"), b"a\nb\r\nc").unwrap();

    let response = run_script(root.path(), b"GET raw.bin\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Opening data connection.\r\na\nb\r\nc\
          226 Transfer complete.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn get_refuses_parent_references() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"GET ../secret\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 Access denied.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn get_refuses_absolute_paths_outside_the_root() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"GET /etc/passwd\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 Access denied.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn get_reports_missing_files_with_550() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"GET nope.txt\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 File not found or access denied.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn list_of_empty_root_is_an_empty_frame() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"LIST\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Here comes the directory listing.\r\n\
          226 Directory send OK.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn list_prints_one_line_per_entry() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("a.txt"), b"x").unwrap();

    let response = run_script(root.path(), b"LIST ignored-arg\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Here comes the directory listing.\r\n\
          a.txt\r\n\
          226 Directory send OK.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn type_a_then_invalid_keeps_ascii() {
    let root = tempdir().unwrap();
    let (mut client, session, server) = spawn_session(test_config(root.path())).await;

    client
        .write_all(b"TYPE A\r\nTYPE X\r\nQUIT\r\n")
        .await
        .unwrap();
    client.shutdown().await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          200 Type set to A (ASCII mode).\r\n\
          504 Command not implemented for that parameter.\r\n\
          221 Goodbye.\r\n"
    );
    assert_eq!(session.lock().await.transfer_type, TransferType::Ascii);
}

#[tokio::test]
async fn type_i_switches_back_to_binary() {
    let root = tempdir().unwrap();
    let (mut client, session, server) = spawn_session(test_config(root.path())).await;

    client
        .write_all(b"TYPE A\r\nTYPE I\r\nQUIT\r\n")
        .await
        .unwrap();
    client.shutdown().await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          200 Type set to A (ASCII mode).\r\n\
          200 Type set to I (Binary mode).\r\n\
          221 Goodbye.\r\n"
    );
    assert_eq!(session.lock().await.transfer_type, TransferType::Binary);
}

#[tokio::test]
async fn put_stores_bytes_until_the_client_stops_sending() {
    let root = tempdir().unwrap();
    let (mut client, _session, server) = spawn_session(test_config(root.path())).await;

    client.write_all(b"PUT upload.bin\r\n").await.unwrap();
    client.write_all(b"payload bytes").await.unwrap();
    client.shutdown().await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Ready to receive data.\r\n\
          226 Transfer complete.\r\n"
    );
    assert_eq!(
        fs::read(root.path().join("upload.bin")).unwrap(),
        b"payload bytes"
    );
}

#[tokio::test]
async fn put_overwrites_an_existing_file() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("upload.bin"), b"old contents that are longer").unwrap();
    let (mut client, _session, server) = spawn_session(test_config(root.path())).await;

    client.write_all(b"PUT upload.bin\r\nnew").await.unwrap();
    client.shutdown().await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          150 Ready to receive data.\r\n\
          226 Transfer complete.\r\n"
    );
    assert_eq!(fs::read(root.path().join("upload.bin")).unwrap(), b"new");
}

#[tokio::test]
async fn put_refuses_paths_with_missing_parents() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"PUT no-dir/x.txt\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 Access denied.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn put_reports_uncreatable_targets() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("adir")).unwrap();

    let response = run_script(root.path(), b"PUT adir\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 Cannot create file.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn ascii_upload_then_download_round_trips_crlf() {
    let root = tempdir().unwrap();

    // First connection: upload "a\r\nb" in ASCII mode. The CR is stripped
    // on the way in, so the stored file holds a bare LF.
    {
        let (mut client, _session, server) = spawn_session(test_config(root.path())).await;
        client
            .write_all(b"TYPE A\r\nPUT notes.txt\r\n")
            .await
            .unwrap();
        client.write_all(b"a\r\nb").await.unwrap();
        client.shutdown().await.unwrap();
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        server.await.unwrap().unwrap();
        assert!(response.ends_with(b"226 Transfer complete.\r\n"));
    }

    assert_eq!(fs::read(root.path().join("notes.txt")).unwrap(), b"a\nb");

    // Second connection: download it again in ASCII mode. The stored LF
    // goes back out as CRLF, matching what the client uploaded.
    {
        let (mut client, _session, server) = spawn_session(test_config(root.path())).await;
        client
            .write_all(b"TYPE A\r\nGET notes.txt\r\nQUIT\r\n")
            .await
            .unwrap();
        client.shutdown().await.unwrap();
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        server.await.unwrap().unwrap();

        assert_eq!(
            response,
            b"220 Welcome to Simple FTP Server\r\n\
              200 Type set to A (ASCII mode).\r\n\
              150 Opening data connection.\r\na\r\nb\
              226 Transfer complete.\r\n\
              221 Goodbye.\r\n"
        );
    }
}

#[tokio::test]
async fn rnfr_rnto_renames_and_consumes_the_source() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("old.txt"), b"data").unwrap();

    let response = run_script(
        root.path(),
        b"RNFR old.txt\r\nRNTO new.txt\r\nRNTO again.txt\r\nQUIT\r\n",
    )
    .await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          350 Ready for destination name.\r\n\
          250 File renamed successfully.\r\n\
          550 Rename failed.\r\n\
          221 Goodbye.\r\n"
    );
    assert!(!root.path().join("old.txt").exists());
    assert_eq!(fs::read(root.path().join("new.txt")).unwrap(), b"data");
    assert!(!root.path().join("again.txt").exists());
}

#[tokio::test]
async fn rnto_without_rnfr_fails_and_touches_nothing() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("keep.txt"), b"k").unwrap();

    let response = run_script(root.path(), b"RNTO other.txt\r\nUSER bob\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 Rename failed.\r\n\
          331 Username OK, need password.\r\n\
          221 Goodbye.\r\n"
    );
    assert!(root.path().join("keep.txt").exists());
    assert!(!root.path().join("other.txt").exists());
}

#[tokio::test]
async fn refused_rnfr_clears_any_pending_rename() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("old.txt"), b"data").unwrap();

    let response = run_script(
        root.path(),
        b"RNFR old.txt\r\nRNFR ../outside\r\nRNTO new.txt\r\nQUIT\r\n",
    )
    .await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          350 Ready for destination name.\r\n\
          550 Access denied.\r\n\
          550 Rename failed.\r\n\
          221 Goodbye.\r\n"
    );
    assert!(root.path().join("old.txt").exists());
}

#[tokio::test]
async fn dele_removes_a_file() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("gone.txt"), b"bye").unwrap();

    let response = run_script(root.path(), b"DELE gone.txt\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          250 File deleted successfully.\r\n\
          221 Goodbye.\r\n"
    );
    assert!(!root.path().join("gone.txt").exists());
}

#[tokio::test]
async fn dele_missing_file_fails_and_session_continues() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"DELE missing.txt\r\nUSER bob\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 File not found or cannot delete.\r\n\
          331 Username OK, need password.\r\n\
          221 Goodbye.\r\n"
    );
}

#[tokio::test]
async fn dele_refuses_parent_references() {
    let root = tempdir().unwrap();
    let response = run_script(root.path(), b"DELE ../victim\r\nQUIT\r\n").await;
    assert_eq!(
        response,
        b"220 Welcome to Simple FTP Server\r\n\
          550 Access denied.\r\n\
          221 Goodbye.\r\n"
    );
}
