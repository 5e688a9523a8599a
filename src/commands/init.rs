//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Folio Configuration

# Site
title: Study Notes
subtitle: ''
description: ''
author: ''
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public
static_dir: static

# Header image for pages without their own background_image
default_background:

highlight:
  theme: base16-ocean.dark
  line_number: false

toc:
  enable: true
  max_depth: 3

# Pages, in reading order. Each page is rendered at /<id>/ and links to
# its neighbours in this list.
pages:
  - id: network
    title: Computer Networks
    file: network.md
  - id: os
    title: Operating Systems
    file: os.md
  - id: crypto
    title: Cryptography
    file: crypto.md
"#;

const SAMPLE_PAGES: &[(&str, &str)] = &[
    (
        "network.md",
        r#"---
description: Layers, packets and the protocols that move them
---
# The Layered Model

Networks are described as a stack of layers, each one serving the layer above.

## Transport

TCP gives an ordered byte stream; UDP gives datagrams.

```rust
use std::net::TcpStream;

let stream = TcpStream::connect("example.com:80")?;
```
"#,
    ),
    (
        "os.md",
        r#"---
description: Processes, memory and scheduling
---
# Processes

A process is a program in execution with its own address space.

## Scheduling

The scheduler decides which runnable thread gets the CPU next.
"#,
    ),
    (
        "crypto.md",
        r#"---
description: Ciphers, hashes and signatures
---
# Symmetric Ciphers

Both parties share one secret key.

## Hash Functions

A hash maps input of any size to a fixed-size digest.
"#,
    ),
];

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{:?} already exists, refusing to overwrite", config_path);
    }

    let content_dir = target_dir.join("content");
    fs::create_dir_all(&content_dir)?;
    fs::create_dir_all(target_dir.join("static").join("images"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;

    for (name, body) in SAMPLE_PAGES {
        let path = content_dir.join(name);
        if !path.exists() {
            fs::write(&path, body)?;
        }
    }

    Ok(())
}
