//! Embedded browser UI served at `/`.
//!
//! The page is self-contained: a file list with a client-side search filter,
//! a rendered view, and an editor with live preview. The preview uses a
//! client-side renderer (marked.js) that is independent of the server-side
//! engine; the two outputs are equivalent but not byte-identical, and the
//! server-rendered HTML is what the read view shows.

pub const APP_SHELL: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>mdserve</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/github-markdown-css/5.5.1/github-markdown.min.css">
<script src="https://cdnjs.cloudflare.com/ajax/libs/marked/11.1.1/marked.min.js"></script>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; height: 100vh; display: flex; }
.sidebar { width: 300px; background: #2d3748; color: #fff; display: flex; flex-direction: column; }
.sidebar-header { padding: 16px; background: #1a202c; }
.sidebar-header h1 { font-size: 1.2rem; }
.sidebar-header .base-dir { font-size: 0.7rem; color: #a0aec0; word-break: break-all; }
.search-box { padding: 10px; }
.search-box input { width: 100%; padding: 6px 8px; border: none; border-radius: 4px; background: #4a5568; color: #fff; }
.file-list { flex: 1; overflow-y: auto; }
.file-item { padding: 8px 14px; cursor: pointer; border-bottom: 1px solid #4a5568; }
.file-item:hover, .file-item.active { background: #4a5568; }
.file-item .dir { font-size: 0.7rem; color: #a0aec0; }
.main { flex: 1; display: flex; flex-direction: column; min-width: 0; }
.toolbar { padding: 10px 16px; border-bottom: 1px solid #e2e8f0; display: flex; align-items: center; gap: 10px; }
.toolbar .path { flex: 1; font-family: monospace; font-size: 0.85rem; color: #4a5568; }
.toolbar button { padding: 6px 14px; border: 1px solid #cbd5e0; border-radius: 4px; background: #fff; cursor: pointer; }
.toolbar button.primary { background: #667eea; color: #fff; border-color: #667eea; }
.toolbar button:disabled { opacity: 0.5; cursor: default; }
.panes { flex: 1; display: flex; min-height: 0; }
.view { flex: 1; overflow-y: auto; padding: 24px; }
.editor { flex: 1; display: none; border-right: 1px solid #e2e8f0; }
.editor textarea { width: 100%; height: 100%; border: none; resize: none; padding: 16px; font-family: monospace; font-size: 0.9rem; outline: none; }
body.editing .editor { display: block; }
.placeholder { color: #a0aec0; padding: 40px; text-align: center; }
</style>
</head>
<body>
<div class="sidebar">
  <div class="sidebar-header">
    <h1>mdserve</h1>
    <div class="base-dir" id="baseDir"></div>
  </div>
  <div class="search-box"><input id="search" type="text" placeholder="Filter files..."></div>
  <div class="file-list" id="fileList"></div>
</div>
<div class="main">
  <div class="toolbar">
    <span class="path" id="currentPath"></span>
    <button id="editBtn" disabled>Edit</button>
    <button id="saveBtn" class="primary" disabled>Save</button>
  </div>
  <div class="panes">
    <div class="editor"><textarea id="editorArea" spellcheck="false"></textarea></div>
    <div class="view markdown-body" id="view"><div class="placeholder">Select a file to view it.</div></div>
  </div>
</div>
<script>
let files = [];
let currentFile = null;
let dirty = false;

async function loadFiles() {
  const res = await fetch('/api/files');
  const data = await res.json();
  if (!data.success) return;
  files = data.files;
  document.getElementById('baseDir').textContent = data.base_dir;
  renderList(files);
}

function renderList(list) {
  const el = document.getElementById('fileList');
  el.innerHTML = '';
  for (const f of list) {
    const item = document.createElement('div');
    item.className = 'file-item' + (currentFile === f.path ? ' active' : '');
    item.innerHTML = '<div>' + f.name + '</div><div class="dir">' + f.dir + ' · ' + f.size + ' B</div>';
    item.onclick = () => openFile(f.path);
    el.appendChild(item);
  }
}

async function openFile(path) {
  if (dirty && !confirm('Discard unsaved changes?')) return;
  const res = await fetch('/api/file/' + path);
  const data = await res.json();
  if (!data.success) { alert(data.error); return; }
  currentFile = data.path;
  dirty = false;
  document.body.classList.remove('editing');
  document.getElementById('currentPath').textContent = data.path;
  document.getElementById('view').innerHTML = data.html;
  document.getElementById('editorArea').value = data.content;
  document.getElementById('editBtn').disabled = false;
  document.getElementById('saveBtn').disabled = true;
  renderList(applyFilter());
}

function applyFilter() {
  const q = document.getElementById('search').value.toLowerCase();
  return files.filter(f => f.name.toLowerCase().includes(q) || f.path.toLowerCase().includes(q));
}

function preview() {
  document.getElementById('view').innerHTML = marked.parse(document.getElementById('editorArea').value);
}

async function saveFile() {
  if (!currentFile) return;
  const content = document.getElementById('editorArea').value;
  const res = await fetch('/api/file/' + currentFile, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ content })
  });
  const data = await res.json();
  if (!data.success) { alert(data.error); return; }
  dirty = false;
  document.getElementById('saveBtn').disabled = true;
  openFile(currentFile);
  loadFiles();
}

document.getElementById('search').addEventListener('input', () => renderList(applyFilter()));
document.getElementById('editBtn').addEventListener('click', () => {
  document.body.classList.toggle('editing');
  if (document.body.classList.contains('editing')) preview();
});
document.getElementById('editorArea').addEventListener('input', () => {
  dirty = true;
  document.getElementById('saveBtn').disabled = false;
  preview();
});
document.getElementById('saveBtn').addEventListener('click', saveFile);
window.addEventListener('beforeunload', e => {
  if (dirty) { e.preventDefault(); e.returnValue = ''; }
});

loadFiles();
</script>
</body>
</html>
"#;
