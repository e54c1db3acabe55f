//! Trust guidance for the generated certificate.

use std::path::Path;

/// Print instructions for trusting the self-signed certificate.
///
/// Browsers warn about self-signed certificates until they are trusted;
/// these are the platform commands to do that.
pub fn print_trust_instructions(cert_path: &Path) {
    let cert_path_str = cert_path.display();

    eprintln!();
    eprintln!("Browsers will warn about the self-signed certificate.");
    eprintln!("To trust it, run one of the following:");
    eprintln!();

    #[cfg(target_os = "macos")]
    {
        eprintln!("  # macOS (adds to login keychain):");
        eprintln!(
            "  security add-trusted-cert -r trustAsRoot -k ~/Library/Keychains/login.keychain-db {}",
            cert_path_str
        );
        eprintln!();
    }

    #[cfg(target_os = "linux")]
    {
        eprintln!("  # Debian/Ubuntu:");
        eprintln!(
            "  sudo cp {} /usr/local/share/ca-certificates/kiln-dev.crt",
            cert_path_str
        );
        eprintln!("  sudo update-ca-certificates");
        eprintln!();
        eprintln!("  # Chrome/Chromium (user-level):");
        eprintln!(
            "  certutil -d sql:$HOME/.pki/nssdb -A -t \"P,,\" -n \"kiln dev cert\" -i {}",
            cert_path_str
        );
        eprintln!();
    }

    #[cfg(target_os = "windows")]
    {
        eprintln!("  # Windows (run as Administrator for system-wide, or without for user):");
        eprintln!("  certutil -user -addstore Root {}", cert_path_str);
        eprintln!();
    }

    eprintln!("Or accept the browser warning; this certificate is for local development only.");
    eprintln!("  Certificate location: {}", cert_path_str);
    eprintln!();
}
