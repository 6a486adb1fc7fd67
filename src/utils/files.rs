use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, Lines},
};

/// Read one document per line from the given path, skipping blank lines
pub async fn read_texts(path: &str) -> io::Result<Vec<String>> {
    let mut r = file_reader(path).await?;
    let mut texts = Vec::new();

    while let Some(line) = r.next_line().await? {
        let text = line.trim();

        if !text.is_empty() {
            texts.push(text.to_string());
        }
    }

    Ok(texts)
}

async fn file_reader(path: &str) -> io::Result<Lines<io::BufReader<File>>> {
    let f = File::open(path).await?;

    Ok(io::BufReader::new(f).lines())
}
