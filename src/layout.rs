//! Responsive Flutter layout template

use anyhow::{Context, Result};
use std::path::Path;

use crate::fsutil;

/// Width (logical pixels) below which the template shows the mobile layout
pub const MOBILE_BREAKPOINT: u32 = 600;

/// A `MaterialApp` whose body switches between mobile and desktop layouts
pub const RESPONSIVE_LAYOUT: &str = r#"import 'package:flutter/material.dart';

void main() {
  runApp(MyApp());
}

class MyApp extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return MaterialApp(
      title: 'Responsive Layout',
      theme: ThemeData(primarySwatch: Colors.blue),
      home: ResponsiveLayout(),
    );
  }
}

class ResponsiveLayout extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return Scaffold(
      appBar: AppBar(
        title: Text("Responsive Layout"),
      ),
      body: LayoutBuilder(
        builder: (context, constraints) {
          if (constraints.maxWidth < 600) {
            // Mobile layout
            return Center(
              child: Text(
                "Mobile Layout",
                style: TextStyle(fontSize: 20),
              ),
            );
          } else {
            // Tablet/Desktop layout
            return Center(
              child: Text(
                "Desktop Layout",
                style: TextStyle(fontSize: 30),
              ),
            );
          }
        },
      ),
    );
  }
}
"#;

/// Write the template to `path`, creating parent directories
pub fn write_template(path: &Path) -> Result<()> {
    fsutil::write_atomic(path, RESPONSIVE_LAYOUT.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}
